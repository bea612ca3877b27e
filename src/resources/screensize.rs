//! Screen size resource.
//!
//! Stores the current framebuffer dimensions in pixels. The HUD and home
//! screen lay themselves out from it; the main loop refreshes it on resize.

use bevy_ecs::prelude::Resource;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
