//! Keeps the [`Hud`] model in step with the avatar and the inventory.
use bevy_ecs::prelude::*;

use crate::components::avatar::{Avatar, AvatarPose};
use crate::resources::audio::SoundState;
use crate::resources::hud::Hud;
use crate::resources::inventory::ToyInventory;
use crate::resources::rooms::Room;

pub fn update_hud(
    mut hud: ResMut<Hud>,
    inventory: Res<ToyInventory>,
    sound: Res<SoundState>,
    avatar: Query<&AvatarPose, With<Avatar>>,
) {
    let room = avatar
        .single()
        .map(|pose| Room::from_world_z(pose.position.z))
        .unwrap_or(hud.room);
    let next = Hud {
        room,
        counters: inventory.counters(),
        total: inventory.total(),
        ambient_on: sound.ambient_on,
    };
    if *hud != next {
        *hud = next;
    }
}
