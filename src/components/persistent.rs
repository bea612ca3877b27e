//! Persistent entity marker component.
//!
//! Leaving a play session despawns every entity except the ones tagged
//! [`Persistent`]: observers and the registered state hook systems.

use bevy_ecs::prelude::Component;

/// Tag for entities that survive session teardown.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
