//! ECS components for entities.
//!
//! Submodules overview:
//! - [`avatar`] – the player's baby: pose, derived states, animation counters
//! - [`interactable`] – toy data (shape, colour, collected flag)
//! - [`persistent`] – marker for entities that survive session teardown
//! - [`timer`] – one-shot countdown that triggers a timer event
//! - [`toast`] – on-screen and pending notifications
//! - [`ttl`] – time-to-live for automatic despawn
pub mod avatar;
pub mod interactable;
pub mod persistent;
pub mod timer;
pub mod toast;
pub mod ttl;
