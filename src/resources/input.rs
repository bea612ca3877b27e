//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the game cares about and exposes it
//! to systems via the [`InputState`] resource. Arrow keys move the avatar,
//! `A`/`B` are the pickup/store actions, `M` toggles the microphone and `N`
//! the room noise.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    /// Inactive state bound to `key`.
    pub fn bound(key: KeyboardKey) -> Self {
        Self {
            key_binding: key,
            ..Default::default()
        }
    }

    /// Overwrite the frame state from raw key readings.
    pub fn update(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    // Arrow keys
    pub direction_up: BoolState,
    pub direction_down: BoolState,
    pub direction_left: BoolState,
    pub direction_right: BoolState,
    // Gameplay actions
    pub action_pickup: BoolState,
    pub action_store: BoolState,
    pub action_back: BoolState,
    pub action_start: BoolState,
    pub toggle_gender: BoolState,
    pub toggle_mic: BoolState,
    pub toggle_audio: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            direction_up: BoolState::bound(KeyboardKey::KEY_UP),
            direction_down: BoolState::bound(KeyboardKey::KEY_DOWN),
            direction_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            direction_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            action_pickup: BoolState::bound(KeyboardKey::KEY_A),
            action_store: BoolState::bound(KeyboardKey::KEY_B),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            action_start: BoolState::bound(KeyboardKey::KEY_ENTER),
            toggle_gender: BoolState::bound(KeyboardKey::KEY_G),
            toggle_mic: BoolState::bound(KeyboardKey::KEY_M),
            toggle_audio: BoolState::bound(KeyboardKey::KEY_N),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    /// True when any of the four movement keys is held.
    pub fn any_direction(&self) -> bool {
        self.direction_up.active
            || self.direction_down.active
            || self.direction_left.active
            || self.direction_right.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_NULL);
    }

    #[test]
    fn test_boolstate_update() {
        let mut bs = BoolState::bound(KeyboardKey::KEY_A);
        bs.update(true, true, false);
        assert!(bs.active && bs.just_pressed && !bs.just_released);
        bs.update(false, false, true);
        assert!(!bs.active && !bs.just_pressed && bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_A);
    }

    #[test]
    fn test_inputstate_default_all_inactive() {
        let input = InputState::default();
        assert!(!input.any_direction());
        assert!(!input.action_pickup.active);
        assert!(!input.action_store.active);
        assert!(!input.action_back.active);
        assert!(!input.toggle_mic.active);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.direction_up.key_binding, KeyboardKey::KEY_UP);
        assert_eq!(input.direction_down.key_binding, KeyboardKey::KEY_DOWN);
        assert_eq!(input.direction_left.key_binding, KeyboardKey::KEY_LEFT);
        assert_eq!(input.direction_right.key_binding, KeyboardKey::KEY_RIGHT);
        assert_eq!(input.action_pickup.key_binding, KeyboardKey::KEY_A);
        assert_eq!(input.action_store.key_binding, KeyboardKey::KEY_B);
        assert_eq!(input.action_back.key_binding, KeyboardKey::KEY_ESCAPE);
        assert_eq!(input.action_start.key_binding, KeyboardKey::KEY_ENTER);
        assert_eq!(input.toggle_gender.key_binding, KeyboardKey::KEY_G);
        assert_eq!(input.toggle_mic.key_binding, KeyboardKey::KEY_M);
        assert_eq!(input.toggle_audio.key_binding, KeyboardKey::KEY_N);
        assert_eq!(input.mode_debug.key_binding, KeyboardKey::KEY_F11);
    }

    #[test]
    fn test_any_direction() {
        let mut input = InputState::default();
        input.direction_left.active = true;
        assert!(input.any_direction());
    }
}
