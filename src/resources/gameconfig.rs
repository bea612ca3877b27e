//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! vsync = true
//! target_fps = 60
//!
//! [gameplay]
//! move_speed = 0.1
//! bound_x_min = -8
//! bound_x_max = 8
//! bound_z_min = -10
//! bound_z_max = 28
//! interact_radius = 2
//! normalize_speed = false
//!
//! [audio]
//! cry_threshold = 30
//! fft_size = 256
//! smoothing = 0.8
//! poll_ms = 16
//!
//! [avatar]
//! gender = boy
//! skin_color = ffd7b5
//! clothes_color = b3e5fc
//! ```
//!
//! Colours are written without a leading `#`, which the INI parser treats as
//! a comment marker.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::avatarlook::{AvatarLook, Gender};

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

pub const DEFAULT_MOVE_SPEED: f32 = 0.1;
pub const DEFAULT_INTERACT_RADIUS: f32 = 2.0;
pub const DEFAULT_CRY_THRESHOLD: f32 = 30.0;
pub const DEFAULT_FFT_SIZE: usize = 256;
pub const DEFAULT_SMOOTHING: f32 = 0.8;
pub const DEFAULT_POLL_MS: u64 = 16;

/// Step size and play-area rectangle for the avatar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// World units moved per tick for each held direction.
    pub move_speed: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    /// Scale the step by frame time (relative to 60 Hz) instead of moving a
    /// fixed distance per frame.
    pub normalize_speed: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            min_x: -8.0,
            max_x: 8.0,
            min_z: -10.0,
            max_z: 28.0,
            normalize_speed: false,
        }
    }
}

/// Microphone analysis settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MicSettings {
    /// Average level (0..=255) above which the baby cries.
    pub cry_threshold: f32,
    /// Analysis window in samples; half as many magnitude bins are produced.
    pub fft_size: usize,
    /// Temporal smoothing of bin magnitudes, `0.0..1.0`.
    pub smoothing: f32,
    /// Analysis cadence of the capture thread.
    pub poll_ms: u64,
}

impl Default for MicSettings {
    fn default() -> Self {
        Self {
            cry_threshold: DEFAULT_CRY_THRESHOLD,
            fft_size: DEFAULT_FFT_SIZE,
            smoothing: DEFAULT_SMOOTHING,
            poll_ms: DEFAULT_POLL_MS,
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    pub movement: MovementConfig,
    /// Pickup/store distance on the floor plane (strict).
    pub interact_radius: f32,
    pub mic: MicSettings,
    /// Look the home screen starts with.
    pub avatar: AvatarLook,
    /// Go straight to playing after setup. Command line only, never saved.
    pub skip_home: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            movement: MovementConfig::default(),
            interact_radius: DEFAULT_INTERACT_RADIUS,
            mic: MicSettings::default(),
            avatar: AvatarLook::default(),
            skip_home: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config)?;

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, speed={}, radius={}, cry_threshold={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.movement.move_speed,
            self.interact_radius,
            self.mic.cry_threshold
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config)
    }

    /// Apply every recognised key, all or nothing: on error `self` is left
    /// exactly as it was.
    fn apply_ini(&mut self, config: &Ini) -> Result<(), String> {
        let mut next = self.clone();
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            next.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            next.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            next.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            next.vsync = vsync;
        }

        // [gameplay] section
        if let Some(speed) = float("gameplay", "move_speed") {
            next.movement.move_speed = speed as f32;
        }
        if let Some(v) = float("gameplay", "bound_x_min") {
            next.movement.min_x = v as f32;
        }
        if let Some(v) = float("gameplay", "bound_x_max") {
            next.movement.max_x = v as f32;
        }
        if let Some(v) = float("gameplay", "bound_z_min") {
            next.movement.min_z = v as f32;
        }
        if let Some(v) = float("gameplay", "bound_z_max") {
            next.movement.max_z = v as f32;
        }
        if let Some(v) = config.getbool("gameplay", "normalize_speed").ok().flatten() {
            next.movement.normalize_speed = v;
        }
        if let Some(radius) = float("gameplay", "interact_radius") {
            next.interact_radius = radius as f32;
        }
        let m = &next.movement;
        // negated so that NaN bounds are rejected too
        if !(m.min_x <= m.max_x) || !(m.min_z <= m.max_z) {
            return Err(format!(
                "Invalid play area: x {}..{}, z {}..{}",
                m.min_x, m.max_x, m.min_z, m.max_z
            ));
        }

        // [audio] section
        if let Some(threshold) = float("audio", "cry_threshold") {
            next.mic.cry_threshold = threshold as f32;
        }
        if let Some(size) = config.getuint("audio", "fft_size").ok().flatten() {
            let size = size as usize;
            if size < 32 || !size.is_power_of_two() {
                return Err(format!("fft_size must be a power of two >= 32, got {}", size));
            }
            next.mic.fft_size = size;
        }
        if let Some(smoothing) = float("audio", "smoothing") {
            next.mic.smoothing = (smoothing as f32).clamp(0.0, 0.99);
        }
        if let Some(ms) = config.getuint("audio", "poll_ms").ok().flatten() {
            next.mic.poll_ms = ms.max(1);
        }

        // [avatar] section
        if let Some(gender) = config.get("avatar", "gender") {
            match Gender::parse(&gender) {
                Ok(g) => next.avatar.gender = g,
                Err(e) => warn!("Ignoring avatar gender: {}", e),
            }
        }
        let skin = config.get("avatar", "skin_color");
        let clothes = config.get("avatar", "clothes_color");
        match next.avatar.with_hex(skin.as_deref(), clothes.as_deref()) {
            Ok(look) => next.avatar = look,
            Err(e) => warn!("Ignoring avatar colours: {}", e),
        }

        *self = next;
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        // [gameplay] section
        let m = &self.movement;
        config.set("gameplay", "move_speed", Some(m.move_speed.to_string()));
        config.set("gameplay", "bound_x_min", Some(m.min_x.to_string()));
        config.set("gameplay", "bound_x_max", Some(m.max_x.to_string()));
        config.set("gameplay", "bound_z_min", Some(m.min_z.to_string()));
        config.set("gameplay", "bound_z_max", Some(m.max_z.to_string()));
        config.set("gameplay", "normalize_speed", Some(m.normalize_speed.to_string()));
        config.set("gameplay", "interact_radius", Some(self.interact_radius.to_string()));

        // [audio] section
        config.set("audio", "cry_threshold", Some(self.mic.cry_threshold.to_string()));
        config.set("audio", "fft_size", Some(self.mic.fft_size.to_string()));
        config.set("audio", "smoothing", Some(self.mic.smoothing.to_string()));
        config.set("audio", "poll_ms", Some(self.mic.poll_ms.to_string()));

        // [avatar] section
        let hex = |c: raylib::prelude::Color| format!("{:02x}{:02x}{:02x}", c.r, c.g, c.b);
        config.set("avatar", "gender", Some(self.avatar.gender.label().to_ascii_lowercase()));
        config.set("avatar", "skin_color", Some(hex(self.avatar.skin_color())));
        config.set("avatar", "clothes_color", Some(hex(self.avatar.clothes_color())));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
