//! Proximity interaction: picking toys up and storing them in the chest.
//!
//! Both actions are distance checks on the floor plane (height ignored)
//! against a strict radius. Toy positions are authored in the toy room's
//! local space and mapped through its [`RoomTransform`] before measuring.
//!
//! [`interaction_observer`] runs the checks the moment the action key goes
//! down, using the avatar pose as it is at that point of the frame.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::Vector3;

use crate::components::avatar::{Avatar, AvatarPose};
use crate::components::interactable::Interactable;
use crate::events::input::{InputAction, InputEvent};
use crate::events::interaction::{ToyPickedUpEvent, ToysStoredEvent, VictoryEvent};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::inventory::{StoreOutcome, ToyInventory};
use crate::resources::rooms::RoomLayout;
use crate::resources::roomtransform::{RoomTransform, planar_distance};

/// First uncollected toy, in manifest order, strictly within `radius` of
/// `avatar_pos`.
///
/// This is not necessarily the closest toy when several are in reach.
pub fn find_nearest<'a>(
    avatar_pos: Vector3,
    candidates: &'a [Interactable],
    transform: &RoomTransform,
    radius: f32,
) -> Option<&'a Interactable> {
    candidates.iter().filter(|toy| !toy.collected).find(|toy| {
        let world = transform.to_world(toy.local_position);
        planar_distance(avatar_pos, world) < radius
    })
}

/// Put everything in hand into the chest when standing close enough.
///
/// Out of reach, or with empty hands, nothing changes and the outcome is
/// empty (`transferred == 0`).
pub fn store_at(
    avatar_pos: Vector3,
    chest_world: Vector3,
    radius: f32,
    inventory: &mut ToyInventory,
) -> StoreOutcome {
    if planar_distance(avatar_pos, chest_world) >= radius {
        return StoreOutcome::default();
    }
    if inventory.counters().in_hand == 0 {
        return StoreOutcome::default();
    }
    inventory.store_all()
}

/// Try to pick up the first toy in reach. Returns the toy id on success.
pub fn try_pick_up(
    avatar_pos: Vector3,
    inventory: &mut ToyInventory,
    transform: &RoomTransform,
    radius: f32,
) -> Option<u32> {
    let id = find_nearest(avatar_pos, inventory.toys(), transform, radius)?.id;
    inventory.pick_up(id).then_some(id)
}

/// Observer running pickup (`A`) and store (`B`) while playing.
///
/// Misses are silent; only successes trigger outcome events.
pub fn interaction_observer(
    trigger: On<InputEvent>,
    state: Res<GameState>,
    config: Res<GameConfig>,
    layout: Option<Res<RoomLayout>>,
    inventory: Option<ResMut<ToyInventory>>,
    avatar: Query<&AvatarPose, With<Avatar>>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if !event.pressed || *state.get() != GameStates::Playing {
        return;
    }
    if !matches!(event.action, InputAction::PickUp | InputAction::Store) {
        return;
    }
    let (Some(layout), Some(mut inventory)) = (layout, inventory) else {
        return;
    };
    let Ok(pose) = avatar.single() else {
        return;
    };
    let radius = config.interact_radius;

    match event.action {
        InputAction::PickUp => {
            match try_pick_up(pose.position, &mut inventory, &layout.toy_room, radius) {
                Some(id) => {
                    info!("Picked up toy {} ({} in hand)", id, inventory.counters().in_hand);
                    commands.trigger(ToyPickedUpEvent { id });
                }
                None => debug!("Nothing to pick up near {:?}", pose.position),
            }
        }
        InputAction::Store => {
            let outcome = store_at(pose.position, layout.chest_world(), radius, &mut inventory);
            if outcome.transferred == 0 {
                debug!("Nothing stored");
                return;
            }
            let counters = inventory.counters();
            info!(
                "Stored {} toy(s), {}/{} in the chest",
                outcome.transferred,
                counters.stored,
                inventory.total()
            );
            commands.trigger(ToysStoredEvent {
                count: outcome.transferred,
            });
            if outcome.victory {
                info!("All toys stored");
                commands.trigger(VictoryEvent {
                    total: inventory.total(),
                });
            }
        }
        _ => {}
    }
}
