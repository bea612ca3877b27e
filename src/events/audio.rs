//! Messages exchanged with the microphone capture thread and the sound
//! playback thread.

use bevy_ecs::message::Message;

/// Commands sent *to* the capture thread.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicCmd {
    /// Open the default input device and start analysing.
    Start,
    /// Close the stream; no further levels are produced.
    Stop,
    Shutdown,
}

/// Messages sent *back* from the capture thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum MicMessage {
    Started,
    /// The device could not be opened (permission, no device, bad format).
    Denied { reason: String },
    /// Average spectrum level of the latest analysis frame, `0..=255`.
    Level { level: f32 },
    Stopped,
}

/// Commands sent to the playback thread.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCmd {
    /// Start the looped room noise.
    AmbientOn,
    AmbientOff,
    /// Keep replaying the cry sweep until [`SoundCmd::CryOff`].
    CryOn,
    CryOff,
    Shutdown,
}
