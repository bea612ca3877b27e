//! Input systems.
//!
//! [`update_input_state`] reads the keyboard from Raylib each frame, writes
//! the results into [`InputState`] and triggers an [`InputEvent`] for every
//! press and release edge. Observers (pickup, store, microphone, room audio,
//! home screen, back) react to those events; the movement system polls the
//! held state.
use bevy_ecs::prelude::*;
use raylib::prelude::RaylibHandle;

use crate::events::input::{InputAction, InputEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::{BoolState, InputState};

/// Refresh one key from Raylib and trigger its edge events.
fn poll_key(
    state: &mut BoolState,
    action: InputAction,
    rl: &RaylibHandle,
    commands: &mut Commands,
) {
    let key = state.key_binding;
    state.update(
        rl.is_key_down(key),
        rl.is_key_pressed(key),
        rl.is_key_released(key),
    );
    trigger_edges(state, action, commands);
}

/// Trigger press/release [`InputEvent`]s for the edges recorded in `state`.
pub fn trigger_edges(state: &BoolState, action: InputAction, commands: &mut Commands) {
    if state.just_pressed {
        commands.trigger(InputEvent {
            action,
            pressed: true,
        });
    }
    if state.just_released {
        commands.trigger(InputEvent {
            action,
            pressed: false,
        });
    }
}

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<RaylibHandle>,
    mut commands: Commands,
) {
    let input = &mut *input;
    let rl = &*rl;
    poll_key(&mut input.direction_up, InputAction::MoveUp, rl, &mut commands);
    poll_key(&mut input.direction_down, InputAction::MoveDown, rl, &mut commands);
    poll_key(&mut input.direction_left, InputAction::MoveLeft, rl, &mut commands);
    poll_key(&mut input.direction_right, InputAction::MoveRight, rl, &mut commands);
    poll_key(&mut input.action_pickup, InputAction::PickUp, rl, &mut commands);
    poll_key(&mut input.action_store, InputAction::Store, rl, &mut commands);
    poll_key(&mut input.action_back, InputAction::Back, rl, &mut commands);
    poll_key(&mut input.action_start, InputAction::Start, rl, &mut commands);
    poll_key(&mut input.toggle_gender, InputAction::ToggleGender, rl, &mut commands);
    poll_key(&mut input.toggle_mic, InputAction::ToggleMic, rl, &mut commands);
    poll_key(&mut input.toggle_audio, InputAction::ToggleAudio, rl, &mut commands);

    let debug_key = input.mode_debug.key_binding;
    input.mode_debug.update(
        rl.is_key_down(debug_key),
        rl.is_key_pressed(debug_key),
        rl.is_key_released(debug_key),
    );
    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
