//! ECS resources made available to systems.
//!
//! Overview
//! - `audio` – bridge and channels for the microphone capture thread
//! - `audiolevel` – loudness threshold and the latest microphone reading
//! - `avatarlook` – gender and colours picked on the home screen
//! - `camera3d` – third-person follow camera
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – INI-backed settings
//! - `gamestate` – authoritative and pending high-level game state
//! - `hud` – room label and inventory counters for display
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `inventory` – toys, counters and the victory latch of a play session
//! - `rooms` – room layout, labels and the toy chest position
//! - `roomtransform` – room-local to world mapping
//! - `screensize` – current framebuffer dimensions in pixels
//! - `spectrum` – byte frequency analyser used by the capture thread
//! - `systemsstore` – registry of state hook systems by name
//! - `toymanifest` – toy definitions a session is created from
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod audiolevel;
pub mod avatarlook;
pub mod camera3d;
pub mod debugmode;
pub mod gameconfig;
pub mod gamestate;
pub mod hud;
pub mod input;
pub mod inventory;
pub mod rooms;
pub mod roomtransform;
pub mod screensize;
pub mod spectrum;
pub mod systemsstore;
pub mod toymanifest;
pub mod worldtime;
