//! Avatar emotional state.
//!
//! Crying follows the microphone: whenever the last reading is loud the baby
//! cries, whatever the arrow keys are doing. Movement keeps working while
//! crying; only the animation changes (see [`AvatarPose::anim`]).
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::avatar::{Avatar, AvatarPose, EmotionalState};
use crate::resources::audiolevel::AudioLevel;

/// Emotional state for the current loudness.
pub fn resolve_avatar_state(loud: bool) -> EmotionalState {
    if loud {
        EmotionalState::Crying
    } else {
        EmotionalState::Neutral
    }
}

/// Apply the latest loudness to the avatar. Runs after movement.
pub fn avatar_state_system(
    audio: Res<AudioLevel>,
    mut query: Query<&mut AvatarPose, With<Avatar>>,
) {
    let emotion = resolve_avatar_state(audio.loud);
    for mut pose in query.iter_mut() {
        if pose.emotion != emotion {
            debug!("Avatar emotion {:?} -> {:?}", pose.emotion, emotion);
            pose.emotion = emotion;
        }
    }
}
