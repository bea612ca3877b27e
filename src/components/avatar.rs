//! Avatar components.
//!
//! The avatar entity carries:
//! - [`Avatar`] – marker for the player-controlled baby
//! - [`AvatarPose`] – world position, facing and the two derived states that
//!   the renderer reads every frame
//! - [`AvatarAnimation`] – transient walk/cry counters driving limb motion
//!
//! [`crate::systems::movement`] writes position, facing and
//! [`MovementState`]; [`crate::systems::avatarstate`] writes
//! [`EmotionalState`] and keeps the animation counters consistent with it.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Marker for the player-controlled avatar.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Avatar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementState {
    #[default]
    Idle,
    Walking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmotionalState {
    #[default]
    Neutral,
    Crying,
}

/// Rendered animation state, resolved from movement and audio each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AvatarAnim {
    #[default]
    Idle,
    Walking,
    Crying,
}

/// Avatar pose in world space.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AvatarPose {
    pub position: Vector3,
    /// Yaw in radians; one of `0`, `π`, `±π/2`.
    pub facing: f32,
    pub movement: MovementState,
    pub emotion: EmotionalState,
}

impl Default for AvatarPose {
    fn default() -> Self {
        Self::at(Vector3::new(0.0, 0.0, -5.0))
    }
}

impl AvatarPose {
    pub fn at(position: Vector3) -> Self {
        Self {
            position,
            facing: 0.0,
            movement: MovementState::Idle,
            emotion: EmotionalState::Neutral,
        }
    }

    /// Animation the renderer should play; crying wins over locomotion.
    pub fn anim(&self) -> AvatarAnim {
        match (self.emotion, self.movement) {
            (EmotionalState::Crying, _) => AvatarAnim::Crying,
            (EmotionalState::Neutral, MovementState::Walking) => AvatarAnim::Walking,
            (EmotionalState::Neutral, MovementState::Idle) => AvatarAnim::Idle,
        }
    }
}

/// Phase accumulators for the procedural walk and cry animations.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AvatarAnimation {
    pub walk_time: f32,
    pub cry_time: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pose_starts_in_bedroom() {
        let pose = AvatarPose::default();
        assert_eq!(pose.position.z, -5.0);
        assert_eq!(pose.facing, 0.0);
        assert_eq!(pose.anim(), AvatarAnim::Idle);
    }

    #[test]
    fn test_anim_precedence() {
        let mut pose = AvatarPose::default();
        pose.movement = MovementState::Walking;
        assert_eq!(pose.anim(), AvatarAnim::Walking);
        pose.emotion = EmotionalState::Crying;
        assert_eq!(pose.anim(), AvatarAnim::Crying);
        pose.movement = MovementState::Idle;
        assert_eq!(pose.anim(), AvatarAnim::Crying);
    }
}
