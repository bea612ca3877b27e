//! Third-person follow camera.
//!
//! The camera trails the avatar at a fixed offset, easing towards its goal by
//! a constant factor every frame, and looks at a point just above the
//! avatar. [`FollowCamera::to_raylib`] builds the raylib camera at draw time.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera3D, Vector3};

pub const CAMERA_OFFSET: Vector3 = Vector3 {
    x: 0.0,
    y: 8.0,
    z: -12.0,
};
pub const LOOK_AT_HEIGHT: f32 = 1.0;
pub const FOLLOW_LERP: f32 = 0.1;
pub const FOVY: f32 = 60.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    pub position: Vector3,
    pub target: Vector3,
    pub fovy: f32,
}

impl FollowCamera {
    /// Camera already settled behind `avatar`.
    pub fn behind(avatar: Vector3) -> Self {
        Self {
            position: avatar + CAMERA_OFFSET,
            target: look_at(avatar),
            fovy: FOVY,
        }
    }

    /// Ease one frame towards the avatar.
    pub fn follow(&mut self, avatar: Vector3) {
        let goal = avatar + CAMERA_OFFSET;
        self.position = self.position + (goal - self.position) * FOLLOW_LERP;
        self.target = look_at(avatar);
    }

    pub fn to_raylib(&self) -> Camera3D {
        Camera3D::perspective(self.position, self.target, Vector3::new(0.0, 1.0, 0.0), self.fovy)
    }
}

fn look_at(avatar: Vector3) -> Vector3 {
    Vector3::new(avatar.x, avatar.y + LOOK_AT_HEIGHT, avatar.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behind_avatar() {
        let cam = FollowCamera::behind(Vector3::new(0.0, 0.0, -5.0));
        assert_eq!(cam.position, Vector3::new(0.0, 8.0, -17.0));
        assert_eq!(cam.target, Vector3::new(0.0, 1.0, -5.0));
    }

    #[test]
    fn test_follow_moves_a_tenth_of_the_way() {
        let mut cam = FollowCamera::behind(Vector3::zero());
        cam.follow(Vector3::new(10.0, 0.0, 0.0));
        assert!((cam.position.x - 1.0).abs() < 1e-5);
        assert!((cam.position.y - 8.0).abs() < 1e-5);
        assert_eq!(cam.target, Vector3::new(10.0, 1.0, 0.0));
    }
}
