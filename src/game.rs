//! State hooks.
//!
//! These systems are registered in the
//! [`SystemsStore`](crate::resources::systemsstore::SystemsStore) and run by
//! the state transition observer:
//! - [`setup`] once, after the window exists
//! - [`enter_home`] when the home screen opens
//! - [`enter_play`] / [`exit_play`] around each play session
//! - [`quit_game`] on the way out
//!
//! A play session is the avatar entity plus the [`ToyInventory`], [`Hud`] and
//! [`FollowCamera`] resources. All of it is created by `enter_play` and gone
//! after `exit_play`; gameplay systems only run while `Playing`, so nothing
//! touches the pose once the session is torn down.
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::avatar::{Avatar, AvatarAnimation, AvatarPose};
use crate::components::persistent::Persistent;
use crate::events::audio::{MicCmd, SoundCmd};
use crate::resources::audio::SoundState;
use crate::resources::audiolevel::{AudioLevel, MicStatus};
use crate::resources::avatarlook::AvatarLook;
use crate::resources::camera3d::FollowCamera;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::hud::Hud;
use crate::resources::inventory::ToyInventory;
use crate::resources::rooms::RoomLayout;
use crate::resources::toymanifest::ToyManifest;

pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    manifest: Option<Res<ToyManifest>>,
    mut next_state: ResMut<NextGameState>,
) {
    commands.insert_resource(RoomLayout::default());
    commands.insert_resource(config.avatar);
    if manifest.is_none() {
        commands.insert_resource(ToyManifest::builtin());
    }

    if config.skip_home {
        next_state.set(GameStates::Playing);
    } else {
        next_state.set(GameStates::Home);
    }
}

pub fn enter_home(look: Res<AvatarLook>) {
    info!(
        "Home screen ({} baby, {} skin, {} clothes)",
        look.gender.label(),
        look.skin_name(),
        look.clothes_name()
    );
}

/// Create a fresh session: avatar at its spawn point, every toy back on the
/// floor, counters at zero.
pub fn enter_play(mut commands: Commands, manifest: Res<ToyManifest>) {
    let pose = AvatarPose::default();
    commands.spawn((Avatar, pose, AvatarAnimation::default()));

    let inventory = ToyInventory::new(manifest.spawn_toys());
    commands.insert_resource(Hud {
        total: inventory.total(),
        ..Default::default()
    });
    info!("Play session started with {} toys", inventory.total());
    commands.insert_resource(inventory);
    commands.insert_resource(FollowCamera::behind(pose.position));
}

/// Tear the session down.
///
/// The microphone is released first and the level forced quiet, any sound
/// still playing is stopped, then every non-persistent entity is despawned
/// and the session resources removed.
pub fn exit_play(
    mut commands: Commands,
    mut audio: ResMut<AudioLevel>,
    mut sound: ResMut<SoundState>,
    mut mic_cmds: MessageWriter<MicCmd>,
    mut sound_cmds: MessageWriter<SoundCmd>,
    entities: Query<Entity, Without<Persistent>>,
) {
    if audio.status != MicStatus::Off {
        mic_cmds.write(MicCmd::Stop);
    }
    audio.silence(MicStatus::Off);
    if sound.crying {
        sound_cmds.write(SoundCmd::CryOff);
    }
    if sound.ambient_on {
        sound_cmds.write(SoundCmd::AmbientOff);
    }
    *sound = SoundState::default();

    let mut despawned = 0;
    for entity in entities.iter() {
        commands.entity(entity).try_despawn();
        despawned += 1;
    }
    commands.remove_resource::<ToyInventory>();
    commands.remove_resource::<Hud>();
    commands.remove_resource::<FollowCamera>();
    info!("Play session ended ({} entities despawned)", despawned);
}

/// Remember the chosen look for next time, if a config file is in use.
pub fn quit_game(mut config: ResMut<GameConfig>, look: Option<Res<AvatarLook>>) {
    info!("Quitting");
    let Some(look) = look else {
        return;
    };
    if config.avatar == *look || !config.config_path.exists() {
        return;
    }
    config.avatar = *look;
    if let Err(e) = config.save_to_file() {
        warn!("Could not save avatar look: {}", e);
    }
}
