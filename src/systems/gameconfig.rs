//! Game configuration change detection.
//!
//! [`apply_gameconfig_changes`] pushes [`GameConfig`] into the window and the
//! loudness detector whenever the resource is added or modified.
//! [`sync_screen_size`] keeps [`ScreenSize`] in step with window resizes.

use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::RaylibHandle;

use crate::resources::audiolevel::AudioLevel;
use crate::resources::gameconfig::GameConfig;
use crate::resources::screensize::ScreenSize;

pub fn apply_gameconfig_changes(
    config: Res<GameConfig>,
    mut rl: NonSendMut<RaylibHandle>,
    mut audio: ResMut<AudioLevel>,
) {
    if !config.is_changed() {
        return;
    }
    rl.set_target_fps(config.target_fps);
    let (w, h) = config.window_size();
    if rl.get_screen_width() != w as i32 || rl.get_screen_height() != h as i32 {
        rl.set_window_size(w as i32, h as i32);
    }
    if audio.monitor.threshold != config.mic.cry_threshold {
        audio.monitor.threshold = config.mic.cry_threshold;
    }
    info!(
        "Applied config: {}x{} @ {} fps, cry threshold {}",
        w, h, config.target_fps, config.mic.cry_threshold
    );
}

pub fn sync_screen_size(rl: NonSend<RaylibHandle>, mut screen: ResMut<ScreenSize>) {
    let current = ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    };
    if *screen != current {
        *screen = current;
    }
}
