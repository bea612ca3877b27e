//! Input action events.
//!
//! This module defines [`InputEvent`] which is triggered when gameplay-relevant
//! input actions occur (press or release). The [`InputAction`] enum lists all
//! recognized actions.
//!
//! Observers react to these events instead of polling the
//! [`InputState`](crate::resources::input::InputState) resource, so pickup and
//! store run at the moment the key goes down, against whatever avatar pose is
//! current at that point of the frame.

use bevy_ecs::prelude::*;

/// Enumeration of logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Up arrow.
    MoveUp,
    /// Down arrow.
    MoveDown,
    /// Left arrow.
    MoveLeft,
    /// Right arrow.
    MoveRight,
    /// Pick up the toy in reach (default: A).
    PickUp,
    /// Empty the hands into the toy chest (default: B).
    Store,
    /// Back to the home screen (default: Escape).
    Back,
    /// Start playing from the home screen (default: Enter).
    Start,
    /// Switch between boy and girl on the home screen (default: G).
    ToggleGender,
    /// Turn the microphone on or off (default: M).
    ToggleMic,
    /// Turn the room noise on or off (default: N).
    ToggleAudio,
}

/// Event emitted when an input action is pressed or released.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}
