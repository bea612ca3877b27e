//! Static room layout.
//!
//! The house is three rooms strung along the world Z axis. Only the bedroom
//! holds interactive content; its container is scaled and turned around, so
//! the toys and the chest it holds are authored in bedroom-local space.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector3;
use std::f32::consts::PI;

use crate::resources::roomtransform::RoomTransform;

/// Rooms of the house, ordered by their position along +Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Room {
    #[default]
    Bedroom,
    LivingRoom,
    Bathroom,
}

impl Room {
    pub const ALL: [Room; 3] = [Room::Bedroom, Room::LivingRoom, Room::Bathroom];

    /// Room containing a world-space Z coordinate.
    pub fn from_world_z(z: f32) -> Room {
        if z < 5.0 {
            Room::Bedroom
        } else if z < 15.0 {
            Room::LivingRoom
        } else {
            Room::Bathroom
        }
    }

    /// HUD label.
    pub fn label(&self) -> &'static str {
        match self {
            Room::Bedroom => "Bedroom",
            Room::LivingRoom => "Living Room",
            Room::Bathroom => "Bathroom",
        }
    }

    /// World Z of the room container origin.
    pub fn origin_z(&self) -> f32 {
        match self {
            Room::Bedroom => 0.0,
            Room::LivingRoom => 10.0,
            Room::Bathroom => 20.0,
        }
    }

    /// Authoring-to-world mapping of the room container (without the Z offset).
    pub fn transform(&self) -> RoomTransform {
        match self {
            Room::Bedroom => RoomTransform::new(1.5, PI),
            Room::LivingRoom | Room::Bathroom => RoomTransform::IDENTITY,
        }
    }
}

/// Where interactive content sits, shared by gameplay and rendering.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RoomLayout {
    /// Transform of the room holding the toys.
    pub toy_room: RoomTransform,
    /// Toy chest position in toy-room local space.
    pub chest_local: Vector3,
}

impl Default for RoomLayout {
    fn default() -> Self {
        Self {
            toy_room: Room::Bedroom.transform(),
            chest_local: Vector3::new(6.0, 0.0, -3.0),
        }
    }
}

impl RoomLayout {
    pub fn chest_world(&self) -> Vector3 {
        self.toy_room.to_world(self.chest_local)
    }
}
