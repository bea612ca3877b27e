//! Character creation screen controls.
//!
//! Left/Right cycle the skin colour, Up/Down the clothes colour, `G` switches
//! gender and Enter starts a play session with the chosen look.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::events::input::{InputAction, InputEvent};
use crate::resources::avatarlook::AvatarLook;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};

/// Apply one home screen action to the look. Returns true to start playing.
pub fn apply_home_action(look: &mut AvatarLook, action: InputAction) -> bool {
    match action {
        InputAction::MoveLeft => look.cycle_skin(-1),
        InputAction::MoveRight => look.cycle_skin(1),
        InputAction::MoveUp => look.cycle_clothes(-1),
        InputAction::MoveDown => look.cycle_clothes(1),
        InputAction::ToggleGender => look.gender = look.gender.toggled(),
        InputAction::Start => return true,
        _ => {}
    }
    false
}

pub fn home_observer(
    trigger: On<InputEvent>,
    state: Res<GameState>,
    mut look: ResMut<AvatarLook>,
    mut next_state: ResMut<NextGameState>,
) {
    let event = trigger.event();
    if !event.pressed || *state.get() != GameStates::Home {
        return;
    }
    if apply_home_action(&mut look, event.action) {
        info!(
            "Starting with a {} baby ({} skin, {} clothes)",
            look.gender.label(),
            look.skin_name(),
            look.clothes_name()
        );
        next_state.set(GameStates::Playing);
    } else {
        debug!("Look is now {:?}", *look);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::avatarlook::Gender;

    #[test]
    fn test_home_actions() {
        let mut look = AvatarLook::default();
        assert!(!apply_home_action(&mut look, InputAction::MoveRight));
        assert_eq!(look.skin_name(), "Medium");
        assert!(!apply_home_action(&mut look, InputAction::MoveUp));
        assert_eq!(look.clothes_name(), "Orange");
        assert!(!apply_home_action(&mut look, InputAction::ToggleGender));
        assert_eq!(look.gender, Gender::Girl);
        assert!(!apply_home_action(&mut look, InputAction::PickUp));
        assert!(apply_home_action(&mut look, InputAction::Start));
    }
}
