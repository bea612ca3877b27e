//! Heads-up display model.
//!
//! Rebuilt each frame from the avatar pose and the inventory; the renderer
//! only formats it.

use bevy_ecs::prelude::Resource;

use crate::resources::inventory::InventoryCounters;
use crate::resources::rooms::Room;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct Hud {
    pub room: Room,
    pub counters: InventoryCounters,
    pub total: u32,
    pub ambient_on: bool,
}

impl Hud {
    pub fn room_line(&self) -> String {
        format!("Room: {}", self.room.label())
    }

    pub fn inventory_line(&self) -> String {
        format!(
            "In hand: {}   Stored: {}/{}",
            self.counters.in_hand, self.counters.stored, self.total
        )
    }

    pub fn sound_line(&self) -> &'static str {
        if self.ambient_on {
            "Audio: on (N to mute)"
        } else {
            "Audio: off (N to turn on)"
        }
    }
}
