//! ECS resources that bridge the main thread with the audio threads.
//!
//! Use [`setup_microphone`] once during initialization to spawn the capture
//! thread and insert the [`MicBridge`] and the `Messages<MicCmd>` /
//! `Messages<MicMessage>` resources. Call [`shutdown_microphone`] during
//! teardown to stop the thread and release the input device.
//!
//! [`setup_sound`] / [`shutdown_sound`] do the same for the playback thread
//! behind [`SoundBridge`]. [`SoundState`] is the gameplay side's view of what
//! that thread is currently playing.

use crate::events::audio::{MicCmd, MicMessage, SoundCmd};
use crate::resources::gameconfig::MicSettings;
use crate::systems::audio::{CpalCapture, DisabledCapture, microphone_thread};
use crate::systems::sound::sound_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::info;

/// Shared bridge between the ECS world and the capture thread.
#[derive(Resource)]
pub struct MicBridge {
    /// Sender for [`MicCmd`] messages (ECS -> capture thread).
    pub tx_cmd: Sender<MicCmd>,
    /// Receiver for [`MicMessage`] messages (capture thread -> ECS).
    pub rx_msg: Receiver<MicMessage>,
    /// Join handle for the background capture thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the capture thread and register bridge resources.
///
/// With `enabled == false` the thread still runs but every start request is
/// answered with [`MicMessage::Denied`], so gameplay sees the same
/// "unavailable" path as a refused permission.
pub fn setup_microphone(world: &mut World, settings: MicSettings, enabled: bool) {
    let (tx_cmd, rx_cmd) = unbounded::<MicCmd>();
    let (tx_msg, rx_msg) = unbounded::<MicMessage>();

    // cpal streams are not Send; the capture source is built on its own thread.
    let handle = std::thread::spawn(move || {
        if enabled {
            microphone_thread(rx_cmd, tx_msg, settings, CpalCapture::new(settings.fft_size * 4))
        } else {
            microphone_thread(rx_cmd, tx_msg, settings, DisabledCapture)
        }
    });
    info!("Microphone thread spawned (capture enabled: {})", enabled);

    world.insert_resource(MicBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.insert_resource(Messages::<MicMessage>::default());
    world.insert_resource(Messages::<MicCmd>::default());
}

/// Request shutdown of the capture thread and join it.
pub fn shutdown_microphone(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<MicBridge>() {
        let _ = bridge.tx_cmd.send(MicCmd::Shutdown);
        let _ = bridge.handle.join();
        info!("Microphone thread stopped");
    }
}

/// Command channel to the playback thread. It never answers.
#[derive(Resource)]
pub struct SoundBridge {
    /// Sender for [`SoundCmd`] messages (ECS -> playback thread).
    pub tx_cmd: Sender<SoundCmd>,
    /// Join handle for the background playback thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// What the playback thread has been told to play.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoundState {
    /// Room noise switched on by the player.
    pub ambient_on: bool,
    /// Cry sweep requested because the level is loud.
    pub crying: bool,
}

/// Spawn the playback thread and register bridge resources.
///
/// With `enabled == false` no thread is started: commands still queue up in
/// `Messages<SoundCmd>` and are simply never forwarded.
pub fn setup_sound(world: &mut World, enabled: bool) {
    world.insert_resource(SoundState::default());
    world.insert_resource(Messages::<SoundCmd>::default());
    if !enabled {
        info!("Sound playback disabled");
        return;
    }
    let (tx_cmd, rx_cmd) = unbounded::<SoundCmd>();
    // raylib audio handles stay on the thread that opened the device
    let handle = std::thread::spawn(move || sound_thread(rx_cmd));
    info!("Sound thread spawned");
    world.insert_resource(SoundBridge { tx_cmd, handle });
}

/// Request shutdown of the playback thread and join it.
pub fn shutdown_sound(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<SoundBridge>() {
        let _ = bridge.tx_cmd.send(SoundCmd::Shutdown);
        let _ = bridge.handle.join();
        info!("Sound thread stopped");
    }
}
