//! Room container transforms.
//!
//! Static room content (toys, the toy chest) is authored in a room-local
//! space. Each room container scales that content uniformly and then rotates
//! it about the vertical axis. [`RoomTransform`] maps points between the two
//! spaces so gameplay code can compare them with the avatar's world position.
//!
//! The rotation is a full yaw matrix, so any angle works, even though the
//! shipped rooms only use `0` and `π`.

use raylib::prelude::Vector3;

/// Uniform scale followed by a yaw rotation (radians, about +Y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomTransform {
    pub scale: f32,
    pub yaw: f32,
}

impl Default for RoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RoomTransform {
    pub const IDENTITY: RoomTransform = RoomTransform {
        scale: 1.0,
        yaw: 0.0,
    };

    pub fn new(scale: f32, yaw: f32) -> Self {
        Self { scale, yaw }
    }

    /// Map a room-local point into world space: scale, then rotate.
    pub fn to_world(&self, local: Vector3) -> Vector3 {
        let scaled = Vector3::new(
            local.x * self.scale,
            local.y * self.scale,
            local.z * self.scale,
        );
        rotate_yaw(scaled, self.yaw)
    }

    /// Inverse of [`RoomTransform::to_world`]: un-rotate, then un-scale.
    ///
    /// A zero scale collapses the room to a point and has no inverse; the
    /// origin is returned in that case.
    pub fn to_local(&self, world: Vector3) -> Vector3 {
        if self.scale == 0.0 {
            return Vector3::zero();
        }
        let unrotated = rotate_yaw(world, -self.yaw);
        Vector3::new(
            unrotated.x / self.scale,
            unrotated.y / self.scale,
            unrotated.z / self.scale,
        )
    }
}

/// Rotate `v` by `yaw` radians about the vertical axis.
///
/// Uses the right-handed convention of the renderer: a positive yaw turns +Z
/// towards +X.
pub fn rotate_yaw(v: Vector3, yaw: f32) -> Vector3 {
    let (sin, cos) = yaw.sin_cos();
    Vector3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
}

/// Distance between two points on the floor plane; height is ignored.
pub fn planar_distance(a: Vector3, b: Vector3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-4;

    fn vec_approx_eq(a: Vector3, b: Vector3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    #[test]
    fn test_identity_leaves_points_alone() {
        let p = Vector3::new(-2.0, 0.15, -3.0);
        assert!(vec_approx_eq(RoomTransform::IDENTITY.to_world(p), p));
    }

    #[test]
    fn test_half_turn_negates_x_and_z_after_scaling() {
        let t = RoomTransform::new(1.5, PI);
        let world = t.to_world(Vector3::new(6.0, 0.0, -3.0));
        assert!(vec_approx_eq(world, Vector3::new(-9.0, 0.0, 4.5)));
    }

    #[test]
    fn test_to_local_inverts_to_world() {
        let t = RoomTransform::new(1.5, PI);
        let local = Vector3::new(6.0, 0.0, -3.0);
        let back = t.to_local(t.to_world(local));
        assert!(vec_approx_eq(back, local));
    }

    #[test]
    fn test_quarter_turn_is_a_real_rotation() {
        let t = RoomTransform::new(2.0, FRAC_PI_2);
        let world = t.to_world(Vector3::new(0.0, 1.0, 1.0));
        assert!(vec_approx_eq(world, Vector3::new(2.0, 2.0, 0.0)));
        let back = t.to_local(world);
        assert!(vec_approx_eq(back, Vector3::new(0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_scale_applies_to_height() {
        let t = RoomTransform::new(1.5, 0.0);
        let world = t.to_world(Vector3::new(0.0, 0.2, 0.0));
        assert!((world.y - 0.3).abs() < EPSILON);
    }

    #[test]
    fn test_zero_scale_has_no_inverse() {
        let t = RoomTransform::new(0.0, PI);
        assert!(vec_approx_eq(
            t.to_local(Vector3::new(1.0, 2.0, 3.0)),
            Vector3::zero()
        ));
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = Vector3::new(-2.0, 0.0, -3.1);
        let b = Vector3::new(-2.0, 0.15, -3.0);
        assert!((planar_distance(a, b) - 0.1).abs() < EPSILON);
    }
}
