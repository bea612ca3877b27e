//! Sound playback thread and the gameplay systems that drive it.
//!
//! - [`sound_thread`] runs on its own OS thread and owns the Raylib audio
//!   device. It synthesizes two sounds at start-up, a looped low-pass white
//!   noise for the room and a short rising cry, and plays them on command.
//! - [`sound_toggle_observer`] turns the `N` key into ambient on/off.
//! - [`cry_sound_system`] follows the edges of [`AudioLevel::loud`] so the
//!   cry plays for as long as the baby is crying.
//! - [`forward_sound_cmds`] moves [`SoundCmd`]s across the channel once per
//!   frame.
//!
//! Nothing flows back from the thread: it has no state the game needs.

use std::f32::consts::TAU;
use std::time::Duration;

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, info, warn};
use raylib::core::audio::{RaylibAudio, Sound};

use crate::events::audio::SoundCmd;
use crate::events::input::{InputAction, InputEvent};
use crate::resources::audio::{SoundBridge, SoundState};
use crate::resources::audiolevel::AudioLevel;
use crate::resources::gamestate::{GameState, GameStates};

pub const SAMPLE_RATE: u32 = 44_100;

const NOISE_SECONDS: f32 = 2.0;
const NOISE_CUTOFF_HZ: f32 = 300.0;
const NOISE_GAIN: f32 = 0.1;

const CRY_SECONDS: f32 = 0.5;
const CRY_FROM_HZ: f32 = 400.0;
const CRY_TO_HZ: f32 = 600.0;
const CRY_ATTACK_SECONDS: f32 = 0.1;
const CRY_PEAK_GAIN: f32 = 0.3;
const CRY_TAIL_GAIN: f32 = 0.1;

/// White noise through a one-pole low-pass filter, scaled to the room volume.
pub fn lowpass_noise(rng: &mut fastrand::Rng, seconds: f32, sample_rate: u32) -> Vec<f32> {
    let len = (seconds * sample_rate as f32) as usize;
    let dt = 1.0 / sample_rate as f32;
    let rc = 1.0 / (TAU * NOISE_CUTOFF_HZ);
    let alpha = dt / (rc + dt);
    let mut y = 0.0f32;
    (0..len)
        .map(|_| {
            let x = rng.f32() * 2.0 - 1.0;
            y += alpha * (x - y);
            y * NOISE_GAIN
        })
        .collect()
}

fn cry_gain(t: f32) -> f32 {
    if t < CRY_ATTACK_SECONDS {
        CRY_PEAK_GAIN * t / CRY_ATTACK_SECONDS
    } else {
        let k = (t - CRY_ATTACK_SECONDS) / (CRY_SECONDS - CRY_ATTACK_SECONDS);
        CRY_PEAK_GAIN + (CRY_TAIL_GAIN - CRY_PEAK_GAIN) * k
    }
}

/// Half a second of sine rising exponentially from 400 to 600 Hz, with a
/// quick fade-in and a slower fade towards the end.
pub fn cry_sweep(sample_rate: u32) -> Vec<f32> {
    let len = (CRY_SECONDS * sample_rate as f32) as usize;
    let ratio = CRY_TO_HZ / CRY_FROM_HZ;
    let mut phase = 0.0f32;
    (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let freq = CRY_FROM_HZ * ratio.powf(t / CRY_SECONDS);
            let sample = phase.sin() * cry_gain(t);
            phase = (phase + TAU * freq / sample_rate as f32) % TAU;
            sample
        })
        .collect()
}

/// Mono 16-bit PCM `.wav` image of `samples`, ready for Raylib's loader.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

/// A loaded sound the playback loop can start, stop and watch.
pub trait Voice {
    fn play(&self);
    fn stop(&self);
    fn is_playing(&self) -> bool;
}

impl Voice for Sound<'_> {
    fn play(&self) {
        Sound::play(self)
    }

    fn stop(&self) {
        Sound::stop(self)
    }

    fn is_playing(&self) -> bool {
        Sound::is_playing(self)
    }
}

/// What the playback thread should currently be sounding.
#[derive(Debug, Default)]
pub struct Playback {
    ambient: bool,
    crying: bool,
}

impl Playback {
    /// Apply one command. Returns `false` once shutdown is requested.
    pub fn apply<V: Voice>(&mut self, cmd: SoundCmd, ambient: &V, cry: &V) -> bool {
        match cmd {
            SoundCmd::AmbientOn => {
                if !self.ambient {
                    ambient.play();
                    self.ambient = true;
                }
            }
            SoundCmd::AmbientOff => {
                ambient.stop();
                self.ambient = false;
            }
            SoundCmd::CryOn => {
                if !self.crying {
                    cry.play();
                    self.crying = true;
                }
            }
            SoundCmd::CryOff => {
                cry.stop();
                self.crying = false;
            }
            SoundCmd::Shutdown => {
                ambient.stop();
                cry.stop();
                return false;
            }
        }
        true
    }

    /// Restart the noise loop and a running cry when they reach their end.
    pub fn pump<V: Voice>(&self, ambient: &V, cry: &V) {
        if self.ambient && !ambient.is_playing() {
            ambient.play();
        }
        if self.crying && !cry.is_playing() {
            cry.play();
        }
    }
}

fn load_sound<'aud>(audio: &'aud RaylibAudio, wav: &[u8]) -> Result<Sound<'aud>, String> {
    let wave = audio
        .new_wave_from_memory(".wav", wav)
        .map_err(|e| e.to_string())?;
    audio.new_sound_from_wave(&wave).map_err(|e| e.to_string())
}

fn drain_until_shutdown(rx_cmd: &Receiver<SoundCmd>) {
    for cmd in rx_cmd.iter() {
        if cmd == SoundCmd::Shutdown {
            break;
        }
    }
}

/// Entry point of the playback thread.
///
/// Blocks until [`SoundCmd::Shutdown`] arrives or the sender is dropped. A
/// missing audio device is not fatal: commands are swallowed and the game
/// stays silent.
pub fn sound_thread(rx_cmd: Receiver<SoundCmd>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            warn!("No audio output, playing silently: {}", e);
            drain_until_shutdown(&rx_cmd);
            return;
        }
    };

    let mut rng = fastrand::Rng::new();
    let noise_wav = encode_wav(
        &lowpass_noise(&mut rng, NOISE_SECONDS, SAMPLE_RATE),
        SAMPLE_RATE,
    );
    let cry_wav = encode_wav(&cry_sweep(SAMPLE_RATE), SAMPLE_RATE);
    let (ambient, cry) = match (
        load_sound(&audio, &noise_wav),
        load_sound(&audio, &cry_wav),
    ) {
        (Ok(ambient), Ok(cry)) => (ambient, cry),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Could not build sounds, playing silently: {}", e);
            drain_until_shutdown(&rx_cmd);
            return;
        }
    };
    debug!("Sound thread ready ({:?})", std::thread::current().id());

    let mut playback = Playback::default();
    'run: loop {
        loop {
            match rx_cmd.try_recv() {
                Ok(cmd) => {
                    if !playback.apply(cmd, &ambient, &cry) {
                        break 'run;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break 'run,
            }
        }
        playback.pump(&ambient, &cry);
        std::thread::sleep(Duration::from_millis(10));
    }
    // sounds drop before the device
}

/// Forward ECS [`SoundCmd`] messages to the playback thread, if there is one.
pub fn forward_sound_cmds(bridge: Option<Res<SoundBridge>>, mut reader: MessageReader<SoundCmd>) {
    for cmd in reader.read() {
        if let Some(bridge) = bridge.as_deref() {
            // ignore send error on shutdown
            let _ = bridge.tx_cmd.send(*cmd);
        }
    }
}

/// Advance the ECS message queue for [`SoundCmd`].
pub fn update_bevy_sound_cmds(mut msgs: ResMut<Messages<SoundCmd>>) {
    msgs.update();
}

/// Observer switching the room noise on and off while playing.
pub fn sound_toggle_observer(
    trigger: On<InputEvent>,
    state: Res<GameState>,
    mut sound: ResMut<SoundState>,
    mut writer: MessageWriter<SoundCmd>,
) {
    let event = trigger.event();
    if event.action != InputAction::ToggleAudio || !event.pressed {
        return;
    }
    if *state.get() != GameStates::Playing {
        return;
    }
    sound.ambient_on = !sound.ambient_on;
    if sound.ambient_on {
        writer.write(SoundCmd::AmbientOn);
        info!("Room audio on");
    } else {
        writer.write(SoundCmd::AmbientOff);
        info!("Room audio off");
    }
}

/// Start the cry sound when the level turns loud, stop it when it calms down.
pub fn cry_sound_system(
    audio: Res<AudioLevel>,
    mut sound: ResMut<SoundState>,
    mut writer: MessageWriter<SoundCmd>,
) {
    if audio.loud == sound.crying {
        return;
    }
    sound.crying = audio.loud;
    writer.write(if audio.loud {
        SoundCmd::CryOn
    } else {
        SoundCmd::CryOff
    });
}
