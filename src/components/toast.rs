//! Toast notification components.

use bevy_ecs::prelude::Component;

/// A notification currently on screen. Lives as long as its `Ttl`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
}

/// A notification waiting on its `Timer` before it shows.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PendingToast {
    pub text: String,
}
