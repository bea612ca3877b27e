//! Avatar movement.
//!
//! [`integrate_movement`] is the pure per-tick step: each held arrow key
//! pushes the avatar a fixed distance along one world axis and snaps its
//! facing, the last key in Up, Down, Left, Right order winning the facing.
//! The result is clamped to the play rectangle. [`movement`] applies it to
//! the avatar entity once per frame.
use bevy_ecs::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI};

use crate::components::avatar::{Avatar, AvatarPose, MovementState};
use crate::resources::gameconfig::{GameConfig, MovementConfig};
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Frame rate the fixed step is tuned for.
const REFERENCE_FPS: f32 = 60.0;

/// Directional flags read by the integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            up: input.direction_up.active,
            down: input.direction_down.active,
            left: input.direction_left.active,
            right: input.direction_right.active,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Compute the next pose from the held directions.
///
/// `dt` only matters when `cfg.normalize_speed` is set; otherwise every tick
/// moves exactly `cfg.move_speed`. Emotional state is carried over untouched.
pub fn integrate_movement(
    dirs: Directions,
    pose: &AvatarPose,
    cfg: &MovementConfig,
    dt: f32,
) -> AvatarPose {
    let step = if cfg.normalize_speed {
        cfg.move_speed * dt * REFERENCE_FPS
    } else {
        cfg.move_speed
    };

    let mut next = *pose;
    if dirs.up {
        next.position.z += step;
        next.facing = PI;
    }
    if dirs.down {
        next.position.z -= step;
        next.facing = 0.0;
    }
    if dirs.left {
        next.position.x += step;
        next.facing = -FRAC_PI_2;
    }
    if dirs.right {
        next.position.x -= step;
        next.facing = FRAC_PI_2;
    }

    next.position.x = next.position.x.clamp(cfg.min_x, cfg.max_x);
    next.position.z = next.position.z.clamp(cfg.min_z, cfg.max_z);
    next.movement = if dirs.any() {
        MovementState::Walking
    } else {
        MovementState::Idle
    };
    next
}

/// Move the avatar according to the arrow keys.
pub fn movement(
    input: Res<InputState>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    mut query: Query<&mut AvatarPose, With<Avatar>>,
) {
    let dirs = Directions::from_input(&input);
    for mut pose in query.iter_mut() {
        let next = integrate_movement(dirs, &pose, &config.movement, time.delta);
        if next != *pose {
            *pose = next;
        }
    }
}
