//! Microphone capture thread and the systems bridging it with the ECS world.
//!
//! - [`microphone_thread`] runs on its own OS thread. It owns the input
//!   stream (through a [`CaptureSource`]), runs the spectrum analysis on its
//!   own cadence and reports [`MicMessage`]s back.
//! - [`forward_mic_cmds`] / [`poll_mic_messages`] move commands and messages
//!   across the channels once per frame.
//! - [`apply_mic_messages`] folds the messages into the
//!   [`AudioLevel`] resource read by the avatar state machine.
//! - [`mic_toggle_observer`] turns the `M` key into start/stop commands.
//!
//! The audio cadence is independent from the frame rate: the main thread only
//! ever sees the latest level, one tick late at most.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, info, warn};

use crate::events::audio::{MicCmd, MicMessage};
use crate::events::input::{InputAction, InputEvent};
use crate::events::toast::ToastEvent;
use crate::resources::audio::MicBridge;
use crate::resources::audiolevel::{AudioLevel, AudioLevelMonitor, MicStatus};
use crate::resources::gameconfig::MicSettings;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::spectrum::SpectrumAnalyser;

/// Something that produces mono microphone samples.
pub trait CaptureSource {
    /// Acquire the device and start capturing.
    fn open(&mut self) -> Result<(), String>;
    /// Release the device. Safe to call when closed.
    fn close(&mut self);
    /// Copy the most recent samples into `out` (oldest first).
    ///
    /// An error means the stream died and must be treated as a denial.
    fn latest(&mut self, out: &mut Vec<f32>) -> Result<(), String>;
}

/// Capture source used when the microphone is switched off on the command line.
pub struct DisabledCapture;

impl CaptureSource for DisabledCapture {
    fn open(&mut self) -> Result<(), String> {
        Err("Microphone disabled".into())
    }

    fn close(&mut self) {}

    fn latest(&mut self, out: &mut Vec<f32>) -> Result<(), String> {
        out.clear();
        Ok(())
    }
}

/// Default input device through cpal, downmixed to mono.
pub struct CpalCapture {
    max_samples: usize,
    buffer: Arc<Mutex<Vec<f32>>>,
    error: Arc<Mutex<Option<String>>>,
    stream: Option<Stream>,
}

impl CpalCapture {
    /// Keep at most `max_samples` of history.
    pub fn new(max_samples: usize) -> Self {
        Self {
            max_samples: max_samples.max(1),
            buffer: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            stream: None,
        }
    }

    fn build_stream(&self) -> Result<Stream, String> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| "No input device available".to_string())?;
        let supported = device
            .default_input_config()
            .map_err(|e| format!("Failed to get input config: {e}"))?;
        let channels = supported.channels().max(1) as usize;
        let stream_config: StreamConfig = supported.clone().into();
        let max_samples = self.max_samples;

        let err_slot = self.error.clone();
        let on_error = move |e: cpal::StreamError| {
            if let Ok(mut slot) = err_slot.lock() {
                *slot = Some(format!("Input stream error: {e}"));
            }
        };

        let stream = match supported.sample_format() {
            SampleFormat::F32 => {
                let buf = self.buffer.clone();
                device.build_input_stream(
                    &stream_config,
                    move |data: &[f32], _| push_frames(&buf, data, channels, max_samples, |s| *s),
                    on_error,
                    None,
                )
            }
            SampleFormat::I16 => {
                let buf = self.buffer.clone();
                device.build_input_stream(
                    &stream_config,
                    move |data: &[i16], _| {
                        push_frames(&buf, data, channels, max_samples, |s| {
                            *s as f32 / i16::MAX as f32
                        })
                    },
                    on_error,
                    None,
                )
            }
            SampleFormat::U16 => {
                let buf = self.buffer.clone();
                device.build_input_stream(
                    &stream_config,
                    move |data: &[u16], _| {
                        push_frames(&buf, data, channels, max_samples, |s| {
                            (*s as f32 / u16::MAX as f32) * 2.0 - 1.0
                        })
                    },
                    on_error,
                    None,
                )
            }
            other => return Err(format!("Unsupported input sample format: {:?}", other)),
        }
        .map_err(|e| format!("Failed to build input stream: {e}"))?;

        stream
            .play()
            .map_err(|e| format!("Failed to start capture: {e}"))?;
        Ok(stream)
    }
}

impl CaptureSource for CpalCapture {
    fn open(&mut self) -> Result<(), String> {
        if self.stream.is_some() {
            return Ok(());
        }
        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
        if let Ok(mut slot) = self.error.lock() {
            *slot = None;
        }
        self.stream = Some(self.build_stream()?);
        Ok(())
    }

    fn close(&mut self) {
        self.stream = None;
    }

    fn latest(&mut self, out: &mut Vec<f32>) -> Result<(), String> {
        if let Some(err) = self.error.lock().ok().and_then(|mut slot| slot.take()) {
            return Err(err);
        }
        out.clear();
        if let Ok(buf) = self.buffer.lock() {
            out.extend_from_slice(&buf);
        }
        Ok(())
    }
}

/// Downmix interleaved frames into the shared history, dropping the oldest.
fn push_frames<T>(
    buffer: &Mutex<Vec<f32>>,
    data: &[T],
    channels: usize,
    max_samples: usize,
    to_f32: impl Fn(&T) -> f32,
) {
    let Ok(mut guard) = buffer.lock() else {
        return;
    };
    for frame in data.chunks(channels) {
        let sum: f32 = frame.iter().map(&to_f32).sum();
        guard.push(sum / channels as f32);
    }
    if guard.len() > max_samples {
        let excess = guard.len() - max_samples;
        guard.drain(0..excess);
    }
}

/// Entry point of the dedicated microphone thread.
///
/// While idle the thread blocks on the command channel. While listening it
/// drains commands without blocking, analyses the newest window every
/// `settings.poll_ms` and sends one [`MicMessage::Level`] per analysis.
///
/// Returns on [`MicCmd::Shutdown`] or when the command channel disconnects.
pub fn microphone_thread<S: CaptureSource>(
    rx_cmd: Receiver<MicCmd>,
    tx_msg: Sender<MicMessage>,
    settings: MicSettings,
    mut source: S,
) {
    debug!(
        "microphone thread starting (id={:?})",
        std::thread::current().id()
    );
    let mut analyser = SpectrumAnalyser::new(settings.fft_size, settings.smoothing);
    let monitor = AudioLevelMonitor::new(settings.cry_threshold);
    let poll = Duration::from_millis(settings.poll_ms.max(1));
    let mut samples: Vec<f32> = Vec::with_capacity(settings.fft_size);
    let mut bins: Vec<u8> = Vec::with_capacity(analyser.bin_count());
    let mut listening = false;

    'run: loop {
        let mut pending: Vec<MicCmd> = Vec::new();
        if listening {
            loop {
                match rx_cmd.try_recv() {
                    Ok(cmd) => pending.push(cmd),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => break 'run,
                }
            }
        } else {
            match rx_cmd.recv() {
                Ok(cmd) => pending.push(cmd),
                Err(_) => break 'run,
            }
        }

        for cmd in pending {
            match cmd {
                MicCmd::Start => {
                    if listening {
                        let _ = tx_msg.send(MicMessage::Started);
                        continue;
                    }
                    match source.open() {
                        Ok(()) => {
                            info!("Microphone capture started");
                            analyser.reset();
                            listening = true;
                            let _ = tx_msg.send(MicMessage::Started);
                        }
                        Err(reason) => {
                            warn!("Microphone unavailable: {}", reason);
                            let _ = tx_msg.send(MicMessage::Denied { reason });
                        }
                    }
                }
                MicCmd::Stop => {
                    if listening {
                        source.close();
                        listening = false;
                        info!("Microphone capture stopped");
                    }
                    let _ = tx_msg.send(MicMessage::Stopped);
                }
                MicCmd::Shutdown => break 'run,
            }
        }

        if listening {
            match source.latest(&mut samples) {
                Ok(()) => {
                    analyser.analyse(&samples, &mut bins);
                    let level = monitor.sample(&bins);
                    let _ = tx_msg.send(MicMessage::Level { level });
                }
                Err(reason) => {
                    warn!("Microphone stream failed: {}", reason);
                    source.close();
                    listening = false;
                    let _ = tx_msg.send(MicMessage::Denied { reason });
                    continue;
                }
            }
            std::thread::sleep(poll);
        }
    }

    source.close();
    debug!("microphone thread exiting");
}

/// Drain pending messages from the capture thread into `Messages<MicMessage>`.
pub fn poll_mic_messages(bridge: Res<MicBridge>, mut writer: MessageWriter<MicMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`MicMessage`].
pub fn update_bevy_mic_messages(mut msgs: ResMut<Messages<MicMessage>>) {
    msgs.update();
}

/// Forward ECS [`MicCmd`] messages to the capture thread.
pub fn forward_mic_cmds(bridge: Res<MicBridge>, mut reader: MessageReader<MicCmd>) {
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(*cmd);
    }
}

/// Advance the ECS message queue for [`MicCmd`].
pub fn update_bevy_mic_cmds(mut msgs: ResMut<Messages<MicCmd>>) {
    msgs.update();
}

/// Fold capture thread messages into [`AudioLevel`].
///
/// Only the newest level of the frame matters. Levels arriving after a stop
/// (or before a start is confirmed) are discarded by [`AudioLevel`] itself.
/// A denial only counts while a start is pending or the stream is live; one
/// that lands after the player switched the microphone off is dropped.
pub fn apply_mic_messages(
    mut reader: MessageReader<MicMessage>,
    mut audio: ResMut<AudioLevel>,
    mut commands: Commands,
) {
    let mut newest_level: Option<f32> = None;
    for msg in reader.read() {
        match msg {
            MicMessage::Started => {
                if audio.status == MicStatus::Starting {
                    audio.silence(MicStatus::Listening);
                    commands.trigger(ToastEvent::new(
                        "Microphone activated! Make noise to make baby cry!",
                    ));
                }
            }
            MicMessage::Denied { reason } => {
                if !matches!(audio.status, MicStatus::Starting | MicStatus::Listening) {
                    debug!("Ignoring late microphone denial: {}", reason);
                    continue;
                }
                audio.silence(MicStatus::Unavailable(reason.clone()));
                newest_level = None;
                commands.trigger(ToastEvent::new("Microphone access denied"));
            }
            MicMessage::Level { level } => newest_level = Some(*level),
            MicMessage::Stopped => debug!("Microphone stream closed"),
        }
    }
    if let Some(level) = newest_level {
        audio.apply_level(level);
    }
}

/// Observer turning the microphone key into start/stop requests.
///
/// Stopping is applied immediately on the gameplay side: the level is
/// forced quiet before the thread even hears about it.
pub fn mic_toggle_observer(
    trigger: On<InputEvent>,
    state: Res<GameState>,
    mut audio: ResMut<AudioLevel>,
    mut writer: MessageWriter<MicCmd>,
) {
    let event = trigger.event();
    if event.action != InputAction::ToggleMic || !event.pressed {
        return;
    }
    if *state.get() != GameStates::Playing {
        return;
    }
    match audio.status {
        MicStatus::Listening | MicStatus::Starting => {
            audio.silence(MicStatus::Off);
            writer.write(MicCmd::Stop);
            info!("Microphone turned off");
        }
        MicStatus::Off | MicStatus::Unavailable(_) => {
            audio.silence(MicStatus::Starting);
            writer.write(MicCmd::Start);
            info!("Microphone requested");
        }
    }
}
