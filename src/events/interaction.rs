//! Gameplay outcome events.
//!
//! Triggered by the interaction observer after the inventory changed. The HUD
//! and toast observers listen to these; nothing here mutates the inventory.

use bevy_ecs::prelude::*;

/// A toy went from the floor into the avatar's hands.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToyPickedUpEvent {
    pub id: u32,
}

/// Everything in hand was put into the chest.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToysStoredEvent {
    pub count: u32,
}

/// The last toy reached the chest. Fired at most once per session.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VictoryEvent {
    pub total: u32,
}
