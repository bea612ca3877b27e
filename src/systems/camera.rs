use bevy_ecs::prelude::*;

use crate::components::avatar::{Avatar, AvatarPose};
use crate::resources::camera3d::FollowCamera;

/// Ease the camera towards its spot behind the avatar.
pub fn camera_follow(mut camera: ResMut<FollowCamera>, avatar: Query<&AvatarPose, With<Avatar>>) {
    if let Ok(pose) = avatar.single() {
        camera.follow(pose.position);
    }
}
