//! Time-to-live component for automatic entity despawning.
//!
//! Toasts are spawned with a [`Ttl`]; [`crate::systems::ttl::ttl_system`]
//! counts it down and despawns the entity when it runs out. There is no
//! callback, it is fire and forget.

use bevy_ecs::prelude::Component;

/// Remaining lifetime in seconds.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    pub remaining: f32,
}

impl Ttl {
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}
