use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::events::gamestate::GameStateChangedEvent;
use crate::events::input::{InputAction, InputEvent};
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}

/// Escape while playing goes back to the home screen.
pub fn back_to_home_observer(
    trigger: On<InputEvent>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    let event = trigger.event();
    if event.action == InputAction::Back && event.pressed && *state.get() == GameStates::Playing {
        next_state.set(GameStates::Home);
    }
}
