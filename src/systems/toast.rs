//! Toast notifications.
//!
//! Gameplay outcomes are turned into [`ToastEvent`]s here; [`toast_observer`]
//! keeps at most one toast on screen. Delayed toasts (the victory message)
//! wait on a [`Timer`] first and show when [`delayed_toast_observer`] sees it
//! expire.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::components::toast::{PendingToast, Toast};
use crate::components::ttl::Ttl;
use crate::events::interaction::{ToyPickedUpEvent, ToysStoredEvent, VictoryEvent};
use crate::events::timer::TimerEvent;
use crate::events::toast::ToastEvent;

pub const TOAST_SECONDS: f32 = 2.0;
pub const VICTORY_DELAY: f32 = 0.5;
pub const SHOW_TOAST_SIGNAL: &str = "show_toast";

pub fn stored_message(count: u32) -> String {
    format!("Stored {} toy(s)!", count)
}

pub fn toast_observer(
    trigger: On<ToastEvent>,
    shown: Query<Entity, With<Toast>>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.delay > 0.0 {
        commands.spawn((
            PendingToast {
                text: event.text.clone(),
            },
            Timer::new(event.delay, SHOW_TOAST_SIGNAL),
        ));
        return;
    }
    for entity in shown.iter() {
        commands.entity(entity).try_despawn();
    }
    commands.spawn((
        Toast {
            text: event.text.clone(),
        },
        Ttl::new(TOAST_SECONDS),
    ));
}

pub fn delayed_toast_observer(
    trigger: On<TimerEvent>,
    pending: Query<&PendingToast>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.signal != SHOW_TOAST_SIGNAL {
        return;
    }
    if let Ok(toast) = pending.get(event.entity) {
        commands.trigger(ToastEvent::new(toast.text.clone()));
    }
    commands.entity(event.entity).try_despawn();
}

pub fn picked_up_toast_observer(_trigger: On<ToyPickedUpEvent>, mut commands: Commands) {
    commands.trigger(ToastEvent::new("Toy picked up!"));
}

pub fn stored_toast_observer(trigger: On<ToysStoredEvent>, mut commands: Commands) {
    commands.trigger(ToastEvent::new(stored_message(trigger.event().count)));
}

pub fn victory_toast_observer(_trigger: On<VictoryEvent>, mut commands: Commands) {
    commands.trigger(ToastEvent::delayed(
        "Victory! All toys collected!",
        VICTORY_DELAY,
    ));
}
