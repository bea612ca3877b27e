//! Microphone loudness state.
//!
//! [`AudioLevelMonitor`] turns one frequency-magnitude frame (bytes, 0..=255
//! per bin) into a single average level and decides whether it is "loud".
//! [`AudioLevel`] is the resource the avatar state machine reads; it is fed by
//! messages from the capture thread (see [`crate::systems::audio`]).
//!
//! "Loud" can only be true while the microphone is actually listening. A
//! denied or stopped microphone always reads as quiet.

use bevy_ecs::prelude::Resource;

use crate::resources::gameconfig::DEFAULT_CRY_THRESHOLD;

/// Average-energy threshold detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioLevelMonitor {
    pub threshold: f32,
}

impl Default for AudioLevelMonitor {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CRY_THRESHOLD,
        }
    }
}

impl AudioLevelMonitor {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Mean bin magnitude of a frequency frame, in `[0, 255]`.
    ///
    /// An empty frame has no energy.
    pub fn sample(&self, bins: &[u8]) -> f32 {
        if bins.is_empty() {
            return 0.0;
        }
        let sum: u32 = bins.iter().map(|&b| b as u32).sum();
        sum as f32 / bins.len() as f32
    }

    /// Strictly above the threshold.
    pub fn is_loud(&self, level: f32) -> bool {
        level > self.threshold
    }
}

/// Microphone availability as seen by gameplay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MicStatus {
    #[default]
    Off,
    /// Start requested, waiting for the capture thread.
    Starting,
    Listening,
    /// Access was denied or no input device exists.
    Unavailable(String),
}

/// Latest loudness reading and microphone status.
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioLevel {
    pub monitor: AudioLevelMonitor,
    pub status: MicStatus,
    /// Last level received while listening.
    pub level: f32,
    pub loud: bool,
}

impl AudioLevel {
    pub fn new(threshold: f32) -> Self {
        Self {
            monitor: AudioLevelMonitor::new(threshold),
            ..Default::default()
        }
    }

    pub fn is_listening(&self) -> bool {
        self.status == MicStatus::Listening
    }

    /// Apply a level reading. Ignored unless the microphone is listening, so
    /// late readings from a stopped stream cannot make the baby cry.
    pub fn apply_level(&mut self, level: f32) {
        if !self.is_listening() {
            return;
        }
        self.level = level;
        self.loud = self.monitor.is_loud(level);
    }

    /// Force the quiet state and record the new status.
    pub fn silence(&mut self, status: MicStatus) {
        self.status = status;
        self.level = 0.0;
        self.loud = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let monitor = AudioLevelMonitor::default();
        assert!(!monitor.is_loud(25.0));
        assert!(!monitor.is_loud(30.0));
        assert!(monitor.is_loud(30.01));
        assert!(monitor.is_loud(35.0));
    }

    #[test]
    fn test_sample_averages_bins() {
        let monitor = AudioLevelMonitor::default();
        assert_eq!(monitor.sample(&[]), 0.0);
        assert_eq!(monitor.sample(&[0, 0, 0, 0]), 0.0);
        assert_eq!(monitor.sample(&[10, 20, 30, 40]), 25.0);
        assert_eq!(monitor.sample(&[255; 128]), 255.0);
    }

    #[test]
    fn test_levels_ignored_unless_listening() {
        let mut audio = AudioLevel::default();
        audio.apply_level(200.0);
        assert!(!audio.loud);
        assert_eq!(audio.level, 0.0);

        audio.status = MicStatus::Listening;
        audio.apply_level(35.0);
        assert!(audio.loud);
        audio.apply_level(30.0);
        assert!(!audio.loud);
    }

    #[test]
    fn test_silence_forces_quiet() {
        let mut audio = AudioLevel::default();
        audio.status = MicStatus::Listening;
        audio.apply_level(120.0);
        assert!(audio.loud);
        audio.silence(MicStatus::Unavailable("denied".into()));
        assert!(!audio.loud);
        assert_eq!(audio.level, 0.0);
        audio.apply_level(120.0);
        assert!(!audio.loud);
    }
}
