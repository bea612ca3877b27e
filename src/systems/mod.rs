//! ECS systems and observers.
//!
//! - `animation` – walk/cry animation counters
//! - `audio` – microphone capture thread and its bridge systems
//! - `avatarstate` – crying follows the microphone
//! - `camera` – follow camera
//! - `gameconfig` – applies config changes to the window
//! - `gamestate` – pending state checks, run conditions, back to home
//! - `home` – character creation controls
//! - `hud` – HUD model refresh
//! - `input` – keyboard polling and input events
//! - `interaction` – pickup and store
//! - `movement` – arrow key movement
//! - `render` – Raylib drawing
//! - `sound` – playback thread, room noise toggle and cry sound
//! - `time` – world clock and timers
//! - `toast` – notifications
//! - `ttl` – time-to-live despawn
pub mod animation;
pub mod audio;
pub mod avatarstate;
pub mod camera;
pub mod gameconfig;
pub mod gamestate;
pub mod home;
pub mod hud;
pub mod input;
pub mod interaction;
pub mod movement;
pub mod render;
pub mod sound;
pub mod time;
pub mod toast;
pub mod ttl;
