//! On-screen notification requests.
//!
//! Triggering a [`ToastEvent`] replaces whatever toast is showing with a new
//! one that disappears on its own. See [`crate::systems::toast`].

use bevy_ecs::prelude::*;

#[derive(Event, Debug, Clone, PartialEq)]
pub struct ToastEvent {
    pub text: String,
    /// Seconds to wait before the toast appears.
    pub delay: f32,
}

impl ToastEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay: 0.0,
        }
    }

    pub fn delayed(text: impl Into<String>, delay: f32) -> Self {
        Self {
            text: text.into(),
            delay,
        }
    }
}
