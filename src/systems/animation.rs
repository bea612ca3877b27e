//! Procedural avatar animation counters.
//!
//! The renderer swings limbs from `walk_time` and shakes the head from
//! `cry_time`. A counter only runs while its animation is the one showing and
//! snaps back to zero the tick that animation ends, so crying stops without a
//! fade.
use bevy_ecs::prelude::*;

use crate::components::avatar::{Avatar, AvatarAnim, AvatarAnimation, AvatarPose};
use crate::resources::worldtime::WorldTime;

pub const WALK_RATE: f32 = 8.0;
pub const CRY_RATE: f32 = 10.0;

/// Advance or reset the counters for the animation currently showing.
pub fn step_animation(anim: AvatarAnim, counters: &mut AvatarAnimation, dt: f32) {
    match anim {
        AvatarAnim::Crying => {
            counters.cry_time += dt * CRY_RATE;
            counters.walk_time = 0.0;
        }
        AvatarAnim::Walking => {
            counters.walk_time += dt * WALK_RATE;
            counters.cry_time = 0.0;
        }
        AvatarAnim::Idle => {
            counters.walk_time = 0.0;
            counters.cry_time = 0.0;
        }
    }
}

pub fn animation(
    time: Res<WorldTime>,
    mut query: Query<(&AvatarPose, &mut AvatarAnimation), With<Avatar>>,
) {
    for (pose, mut counters) in query.iter_mut() {
        step_animation(pose.anim(), &mut counters, time.delta);
    }
}
