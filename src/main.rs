//! Baby Home main entry point.
//!
//! A small 3D toy written in Rust using:
//! - **raylib** for windowing and drawing
//! - **bevy_ecs** for the entity-component-system architecture
//! - **cpal** for microphone capture on a background thread
//! - **raylib audio** for the room noise and the cry, on their own thread
//!
//! The player dresses up a baby on the home screen, then walks it around a
//! three-room house picking toys up and putting them in the toy chest. Making
//! noise into the microphone makes the baby cry, and you can hear it.
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and the toy manifest, open the window
//! 2. Insert resources, spawn observers, register state hook systems
//! 3. Enter `Setup`, which moves on to the home screen (or straight to play)
//! 4. Each frame: input, microphone bridge, movement, avatar state, cry
//!    sound, animation, HUD, camera, sound bridge, render
//! 5. On window close: leave the current state, stop both audio threads
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --help
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use babyhome::components::persistent::Persistent;
use babyhome::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use babyhome::events::switchdebug::switch_debug_observer;
use babyhome::game;
use babyhome::resources::audio::{
    setup_microphone, setup_sound, shutdown_microphone, shutdown_sound,
};
use babyhome::resources::audiolevel::AudioLevel;
use babyhome::resources::gameconfig::GameConfig;
use babyhome::resources::gamestate::{GameState, GameStates, NextGameState};
use babyhome::resources::input::InputState;
use babyhome::resources::screensize::ScreenSize;
use babyhome::resources::systemsstore::SystemsStore;
use babyhome::resources::toymanifest::ToyManifest;
use babyhome::resources::worldtime::WorldTime;
use babyhome::systems::animation::animation;
use babyhome::systems::audio::{
    apply_mic_messages, forward_mic_cmds, mic_toggle_observer, poll_mic_messages,
    update_bevy_mic_cmds, update_bevy_mic_messages,
};
use babyhome::systems::avatarstate::avatar_state_system;
use babyhome::systems::camera::camera_follow;
use babyhome::systems::gameconfig::{apply_gameconfig_changes, sync_screen_size};
use babyhome::systems::gamestate::{back_to_home_observer, check_pending_state, state_is_playing};
use babyhome::systems::home::home_observer;
use babyhome::systems::hud::update_hud;
use babyhome::systems::input::update_input_state;
use babyhome::systems::interaction::interaction_observer;
use babyhome::systems::movement::movement;
use babyhome::systems::render::render_system;
use babyhome::systems::sound::{
    cry_sound_system, forward_sound_cmds, sound_toggle_observer, update_bevy_sound_cmds,
};
use babyhome::systems::time::{update_timers, update_world_time};
use babyhome::systems::toast::{
    delayed_toast_observer, picked_up_toast_observer, stored_toast_observer, toast_observer,
    victory_toast_observer,
};
use babyhome::systems::ttl::ttl_system;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

/// Baby Home
#[derive(Parser)]
#[command(version, about = "Dress up a baby, tidy up the toys, make it cry with your voice.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON toy manifest replacing the built-in toys.
    #[arg(long, value_name = "PATH")]
    toys: Option<PathBuf>,

    /// Never open the microphone; the baby will not cry.
    #[arg(long)]
    no_mic: bool,

    /// Never open an audio output; no room noise, no crying sound.
    #[arg(long)]
    no_sound: bool,

    /// Skip the home screen and start playing with the configured look.
    #[arg(long)]
    skip_home: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    match config.load_from_file() {
        Ok(()) => info!("Loaded config from {:?}", config.config_path),
        Err(e) => warn!("Using default config: {}", e),
    }
    config.skip_home = cli.skip_home;

    let manifest = match &cli.toys {
        Some(path) => match ToyManifest::load_from_file(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                error!("Invalid toy manifest: {}", e);
                std::process::exit(1);
            }
        },
        None => ToyManifest::builtin(),
    };

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .msaa_4x()
        .title("Baby Home");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Escape goes back to the home screen instead of closing the window
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(InputState::default());
    world.insert_resource(AudioLevel::new(config.mic.cry_threshold));
    world.insert_resource(manifest);

    // sets up MicBridge and the MicCmd/MicMessage queues
    setup_microphone(&mut world, config.mic, !cli.no_mic);
    // sets up SoundBridge, SoundState and the SoundCmd queue
    setup_sound(&mut world, !cli.no_sound);

    world.insert_resource(config);
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));

    let mut systems_store = SystemsStore::new();
    systems_store.register(&mut world, "setup", game::setup);
    systems_store.register(&mut world, "enter_home", game::enter_home);
    systems_store.register(&mut world, "enter_play", game::enter_play);
    systems_store.register(&mut world, "exit_play", game::exit_play);
    systems_store.register(&mut world, "quit_game", game::quit_game);
    world.insert_resource(systems_store);

    world.flush();

    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.spawn((Observer::new(home_observer), Persistent));
    world.spawn((Observer::new(back_to_home_observer), Persistent));
    world.spawn((Observer::new(interaction_observer), Persistent));
    world.spawn((Observer::new(mic_toggle_observer), Persistent));
    world.spawn((Observer::new(sound_toggle_observer), Persistent));
    world.spawn((Observer::new(toast_observer), Persistent));
    world.spawn((Observer::new(delayed_toast_observer), Persistent));
    world.spawn((Observer::new(picked_up_toast_observer), Persistent));
    world.spawn((Observer::new(stored_toast_observer), Persistent));
    world.spawn((Observer::new(victory_toast_observer), Persistent));
    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {}); // enter Setup right away

    let mut update = Schedule::default();
    update.add_systems(sync_screen_size);
    update.add_systems(apply_gameconfig_changes);
    update.add_systems(update_input_state);
    update.add_systems(check_pending_state.after(update_input_state));
    update.add_systems(
        // microphone bridge systems must be together
        (
            update_bevy_mic_cmds,
            forward_mic_cmds,
            poll_mic_messages,
            update_bevy_mic_messages,
            apply_mic_messages,
        )
            .chain()
            .after(update_input_state),
    );
    update.add_systems(
        (
            movement,
            avatar_state_system,
            cry_sound_system,
            animation,
            update_hud,
            camera_follow,
        )
            .chain()
            .run_if(state_is_playing)
            .after(check_pending_state)
            .after(apply_mic_messages),
    );
    update.add_systems(
        // sound bridge systems must be together
        (update_bevy_sound_cmds, forward_sound_cmds)
            .chain()
            .after(check_pending_state)
            .after(cry_sound_system),
    );
    update.add_systems((update_timers, ttl_system).after(check_pending_state));
    update.add_systems(
        render_system
            .after(camera_follow)
            .after(update_timers)
            .after(ttl_system)
            .after(sync_screen_size),
    );

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }

    world.resource_mut::<NextGameState>().set(GameStates::Quitting);
    world.trigger(GameStateChangedEvent {});
    world.flush();
    shutdown_microphone(&mut world);
    shutdown_sound(&mut world);
}
