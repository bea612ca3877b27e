//! Byte frequency analyser for microphone frames.
//!
//! Mirrors the classic analyser-node pipeline: the most recent `fft_size`
//! samples are Blackman-windowed, transformed, normalized by `fft_size`,
//! smoothed over time, converted to decibels and mapped from
//! `[MIN_DB, MAX_DB]` to bytes. Only `fft_size / 2` bins are produced.
//!
//! The transform is a direct DFT over precomputed twiddles; at the default
//! 256-point window that is cheap enough for a ~60 Hz analysis loop.

use std::f32::consts::PI;

pub const MIN_DB: f32 = -100.0;
pub const MAX_DB: f32 = -30.0;

pub struct SpectrumAnalyser {
    fft_size: usize,
    smoothing: f32,
    window: Vec<f32>,
    cos_table: Vec<f32>,
    sin_table: Vec<f32>,
    smoothed: Vec<f32>,
}

impl SpectrumAnalyser {
    pub fn new(fft_size: usize, smoothing: f32) -> Self {
        let n = fft_size.max(2);
        let window = (0..n)
            .map(|i| {
                let x = i as f32 / n as f32;
                0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
            })
            .collect();
        let cos_table = (0..n).map(|i| (2.0 * PI * i as f32 / n as f32).cos()).collect();
        let sin_table = (0..n).map(|i| (2.0 * PI * i as f32 / n as f32).sin()).collect();
        Self {
            fft_size: n,
            smoothing: smoothing.clamp(0.0, 0.99),
            window,
            cos_table,
            sin_table,
            smoothed: vec![0.0; n / 2],
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Forget the smoothing history, e.g. when the stream restarts.
    pub fn reset(&mut self) {
        self.smoothed.iter_mut().for_each(|m| *m = 0.0);
    }

    /// Analyse the newest `fft_size` samples of `samples` into `out`.
    ///
    /// Short input is zero-padded at the front. `out` is resized to
    /// [`SpectrumAnalyser::bin_count`].
    pub fn analyse(&mut self, samples: &[f32], out: &mut Vec<u8>) {
        let n = self.fft_size;
        let mut frame = vec![0.0f32; n];
        let take = samples.len().min(n);
        frame[n - take..].copy_from_slice(&samples[samples.len() - take..]);
        for (s, w) in frame.iter_mut().zip(self.window.iter()) {
            *s *= *w;
        }

        out.clear();
        out.reserve(self.bin_count());
        for k in 0..self.bin_count() {
            let mut re = 0.0f32;
            let mut im = 0.0f32;
            for (i, s) in frame.iter().enumerate() {
                let idx = (k * i) % n;
                re += s * self.cos_table[idx];
                im -= s * self.sin_table[idx];
            }
            let magnitude = (re * re + im * im).sqrt() / n as f32;
            let smoothed = self.smoothing * self.smoothed[k] + (1.0 - self.smoothing) * magnitude;
            self.smoothed[k] = smoothed;
            out.push(to_byte(smoothed));
        }
    }
}

fn to_byte(magnitude: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - MIN_DB) / (MAX_DB - MIN_DB);
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::audiolevel::AudioLevelMonitor;

    #[test]
    fn test_bin_count_is_half_the_window() {
        let analyser = SpectrumAnalyser::new(256, 0.8);
        assert_eq!(analyser.bin_count(), 128);
    }

    #[test]
    fn test_silence_is_all_zero() {
        let mut analyser = SpectrumAnalyser::new(256, 0.8);
        let mut out = Vec::new();
        analyser.analyse(&[0.0; 256], &mut out);
        assert_eq!(out.len(), 128);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_short_input_is_padded() {
        let mut analyser = SpectrumAnalyser::new(64, 0.0);
        let mut out = Vec::new();
        analyser.analyse(&[0.0; 10], &mut out);
        assert_eq!(out.len(), 32);
    }

    #[test]
    fn test_loud_noise_crosses_the_cry_threshold() {
        let mut rng = fastrand::Rng::with_seed(7);
        let noise: Vec<f32> = (0..256).map(|_| rng.f32() * 2.0 - 1.0).collect();
        let mut analyser = SpectrumAnalyser::new(256, 0.8);
        let monitor = AudioLevelMonitor::default();
        let mut out = Vec::new();
        for _ in 0..5 {
            analyser.analyse(&noise, &mut out);
        }
        assert!(monitor.is_loud(monitor.sample(&out)));
    }

    #[test]
    fn test_faint_noise_stays_quiet() {
        let mut rng = fastrand::Rng::with_seed(11);
        let noise: Vec<f32> = (0..256).map(|_| (rng.f32() * 2.0 - 1.0) * 1e-5).collect();
        let mut analyser = SpectrumAnalyser::new(256, 0.8);
        let monitor = AudioLevelMonitor::default();
        let mut out = Vec::new();
        for _ in 0..5 {
            analyser.analyse(&noise, &mut out);
        }
        assert!(!monitor.is_loud(monitor.sample(&out)));
    }

    #[test]
    fn test_smoothing_decays_after_sound_stops() {
        let mut rng = fastrand::Rng::with_seed(3);
        let noise: Vec<f32> = (0..256).map(|_| rng.f32() * 2.0 - 1.0).collect();
        let mut analyser = SpectrumAnalyser::new(256, 0.8);
        let monitor = AudioLevelMonitor::default();
        let mut out = Vec::new();
        analyser.analyse(&noise, &mut out);
        let loud = monitor.sample(&out);
        for _ in 0..60 {
            analyser.analyse(&[0.0; 256], &mut out);
        }
        let after = monitor.sample(&out);
        assert!(after < loud);
        analyser.reset();
        analyser.analyse(&[0.0; 256], &mut out);
        assert_eq!(monitor.sample(&out), 0.0);
    }
}
