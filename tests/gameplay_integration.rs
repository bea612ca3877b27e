//! Gameplay tick integration tests: movement, proximity interaction, the
//! avatar state machine, the cry sound and toasts, driven through real
//! systems and observers on a headless world.

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use raylib::prelude::Vector3;

use babyhome::components::avatar::{
    Avatar, AvatarAnim, AvatarAnimation, AvatarPose, EmotionalState, MovementState,
};
use babyhome::components::persistent::Persistent;
use babyhome::components::toast::{PendingToast, Toast};
use babyhome::events::audio::{MicCmd, MicMessage, SoundCmd};
use babyhome::events::input::{InputAction, InputEvent};
use babyhome::events::interaction::{ToyPickedUpEvent, VictoryEvent};
use babyhome::resources::audio::SoundState;
use babyhome::resources::audiolevel::{AudioLevel, MicStatus};
use babyhome::resources::gameconfig::GameConfig;
use babyhome::resources::gamestate::{GameState, GameStates};
use babyhome::resources::input::InputState;
use babyhome::resources::inventory::ToyInventory;
use babyhome::resources::rooms::RoomLayout;
use babyhome::resources::toymanifest::ToyManifest;
use babyhome::resources::worldtime::WorldTime;
use babyhome::systems::animation::animation;
use babyhome::systems::audio::apply_mic_messages;
use babyhome::systems::avatarstate::avatar_state_system;
use babyhome::systems::interaction::interaction_observer;
use babyhome::systems::movement::movement;
use babyhome::systems::sound::cry_sound_system;
use babyhome::systems::time::{update_timers, update_world_time};
use babyhome::systems::toast::{
    delayed_toast_observer, picked_up_toast_observer, stored_toast_observer, toast_observer,
    victory_toast_observer,
};
use babyhome::systems::ttl::ttl_system;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Resource, Default)]
struct Seen {
    pickups: Vec<u32>,
    victories: u32,
}

fn count_pickups(trigger: On<ToyPickedUpEvent>, mut seen: ResMut<Seen>) {
    seen.pickups.push(trigger.event().id);
}

fn count_victories(_trigger: On<VictoryEvent>, mut seen: ResMut<Seen>) {
    seen.victories += 1;
}

/// A world already in `Playing` with one avatar and the built-in toys.
fn make_playing_world(avatar_at: Vector3) -> (World, Entity) {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_delta(1.0 / 60.0));
    world.insert_resource(GameConfig::new());
    world.insert_resource(InputState::default());
    world.insert_resource(AudioLevel::new(30.0));
    world.insert_resource(RoomLayout::default());
    world.insert_resource(ToyInventory::new(ToyManifest::builtin().spawn_toys()));
    world.insert_resource(Seen::default());
    world.init_resource::<Messages<MicCmd>>();
    world.init_resource::<Messages<MicMessage>>();
    world.insert_resource(SoundState::default());
    world.init_resource::<Messages<SoundCmd>>();

    let mut state = GameState::new();
    state.set(GameStates::Playing);
    world.insert_resource(state);

    world.spawn((Observer::new(interaction_observer), Persistent));
    world.spawn((Observer::new(toast_observer), Persistent));
    world.spawn((Observer::new(delayed_toast_observer), Persistent));
    world.spawn((Observer::new(picked_up_toast_observer), Persistent));
    world.spawn((Observer::new(stored_toast_observer), Persistent));
    world.spawn((Observer::new(victory_toast_observer), Persistent));
    world.spawn((Observer::new(count_pickups), Persistent));
    world.spawn((Observer::new(count_victories), Persistent));

    let avatar = world
        .spawn((Avatar, AvatarPose::at(avatar_at), AvatarAnimation::default()))
        .id();
    world.flush();
    (world, avatar)
}

fn press(world: &mut World, action: InputAction) {
    world.trigger(InputEvent {
        action,
        pressed: true,
    });
    world.flush();
}

fn teleport(world: &mut World, avatar: Entity, to: Vector3) {
    let mut pose = world.get_mut::<AvatarPose>(avatar).unwrap();
    pose.position = to;
}

fn toy_world_positions(world: &World) -> Vec<(u32, Vector3)> {
    let layout = *world.resource::<RoomLayout>();
    world
        .resource::<ToyInventory>()
        .toys()
        .iter()
        .map(|toy| {
            let p = layout.toy_room.to_world(toy.local_position);
            (toy.id, Vector3::new(p.x, 0.0, p.z))
        })
        .collect()
}

fn toast_texts(world: &mut World) -> Vec<String> {
    let mut query = world.query::<&Toast>();
    query.iter(world).map(|t| t.text.clone()).collect()
}

fn tick_gameplay_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((apply_mic_messages, movement, avatar_state_system, animation).chain());
    schedule
}

fn tick_timers(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems((update_timers, ttl_system).chain());
    schedule.run(world);
    world.flush();
}

fn send_mic(world: &mut World, messages: Vec<MicMessage>) {
    let mut state = SystemState::<MessageWriter<MicMessage>>::new(world);
    let mut writer = state.get_mut(world);
    for msg in messages {
        writer.write(msg);
    }
    state.apply(world);
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn movement_never_leaves_the_play_area() {
    let (mut world, avatar) = make_playing_world(Vector3::new(0.0, 0.0, -5.0));
    let bounds = world.resource::<GameConfig>().movement;
    let mut schedule = Schedule::default();
    schedule.add_systems(movement);

    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..3000 {
        {
            let mut input = world.resource_mut::<InputState>();
            input.direction_up.active = rng.bool();
            input.direction_down.active = rng.bool() && rng.bool();
            input.direction_left.active = rng.bool();
            input.direction_right.active = rng.bool() && rng.bool();
        }
        update_world_time(&mut world, 1.0 / 60.0);
        schedule.run(&mut world);

        let any = world.resource::<InputState>().any_direction();
        let pose = world.get::<AvatarPose>(avatar).unwrap();
        assert!(pose.position.x >= bounds.min_x && pose.position.x <= bounds.max_x);
        assert!(pose.position.z >= bounds.min_z && pose.position.z <= bounds.max_z);
        assert_eq!(pose.movement == MovementState::Walking, any);
    }
}

#[test]
fn holding_up_walks_into_the_living_room() {
    let (mut world, avatar) = make_playing_world(Vector3::new(0.0, 0.0, 4.0));
    world.resource_mut::<InputState>().direction_up.active = true;
    let mut schedule = Schedule::default();
    schedule.add_systems(movement);

    for _ in 0..20 {
        update_world_time(&mut world, 1.0 / 60.0);
        schedule.run(&mut world);
    }

    let pose = world.get::<AvatarPose>(avatar).unwrap();
    assert!(approx_eq(pose.position.z, 6.0));
    assert!(approx_eq(pose.facing, std::f32::consts::PI));
}

// =============================================================================
// Proximity interaction
// =============================================================================

#[test]
fn pickup_in_reach_collects_one_toy_and_shows_toast() {
    let (mut world, avatar) = make_playing_world(Vector3::zero());
    let (first_id, first_pos) = toy_world_positions(&world)[0];
    teleport(&mut world, avatar, first_pos);

    press(&mut world, InputAction::PickUp);

    let inventory = world.resource::<ToyInventory>();
    assert_eq!(inventory.counters().in_hand, 1);
    assert!(inventory.toys().iter().any(|t| t.id == first_id && t.collected));
    assert_eq!(world.resource::<Seen>().pickups, vec![first_id]);
    assert_eq!(toast_texts(&mut world), vec!["Toy picked up!".to_string()]);

    // nothing else within reach of that spot
    press(&mut world, InputAction::PickUp);
    assert_eq!(world.resource::<ToyInventory>().counters().in_hand, 1);
    assert_eq!(world.resource::<Seen>().pickups.len(), 1);
}

#[test]
fn pickup_out_of_reach_is_silent() {
    let (mut world, _avatar) = make_playing_world(Vector3::new(0.0, 0.0, 25.0));

    press(&mut world, InputAction::PickUp);
    press(&mut world, InputAction::Store);

    assert_eq!(world.resource::<ToyInventory>().counters().in_hand, 0);
    assert!(world.resource::<Seen>().pickups.is_empty());
    assert!(toast_texts(&mut world).is_empty());
}

#[test]
fn key_release_does_not_interact() {
    let (mut world, avatar) = make_playing_world(Vector3::zero());
    let (_, pos) = toy_world_positions(&world)[0];
    teleport(&mut world, avatar, pos);

    world.trigger(InputEvent {
        action: InputAction::PickUp,
        pressed: false,
    });
    world.flush();

    assert_eq!(world.resource::<ToyInventory>().counters().in_hand, 0);
}

#[test]
fn storing_every_toy_fires_victory_once_and_delays_its_toast() {
    let (mut world, avatar) = make_playing_world(Vector3::zero());
    for (_, pos) in toy_world_positions(&world) {
        teleport(&mut world, avatar, pos);
        press(&mut world, InputAction::PickUp);
    }
    assert_eq!(world.resource::<ToyInventory>().counters().in_hand, 8);

    let chest = world.resource::<RoomLayout>().chest_world();
    teleport(&mut world, avatar, Vector3::new(chest.x + 1.0, 0.0, chest.z));
    press(&mut world, InputAction::Store);

    let counters = world.resource::<ToyInventory>().counters();
    assert_eq!(counters.in_hand, 0);
    assert_eq!(counters.stored, 8);
    assert_eq!(world.resource::<Seen>().victories, 1);
    assert_eq!(toast_texts(&mut world), vec!["Stored 8 toy(s)!".to_string()]);
    let mut pending = world.query::<&PendingToast>();
    assert_eq!(pending.iter(&world).count(), 1);

    // empty hands: a second store does nothing
    press(&mut world, InputAction::Store);
    assert_eq!(world.resource::<Seen>().victories, 1);

    tick_timers(&mut world, 0.3);
    assert_eq!(toast_texts(&mut world), vec!["Stored 8 toy(s)!".to_string()]);
    tick_timers(&mut world, 0.3);
    assert_eq!(
        toast_texts(&mut world),
        vec!["Victory! All toys collected!".to_string()]
    );
    assert_eq!(pending.iter(&world).count(), 0);
}

#[test]
fn toast_expires_after_two_seconds() {
    let (mut world, avatar) = make_playing_world(Vector3::zero());
    let (_, pos) = toy_world_positions(&world)[0];
    teleport(&mut world, avatar, pos);
    press(&mut world, InputAction::PickUp);

    tick_timers(&mut world, 1.5);
    assert_eq!(toast_texts(&mut world).len(), 1);
    tick_timers(&mut world, 0.6);
    assert!(toast_texts(&mut world).is_empty());
}

// =============================================================================
// Avatar state machine
// =============================================================================

#[test]
fn crying_wins_over_walking_and_resets_when_quiet() {
    let (mut world, avatar) = make_playing_world(Vector3::new(0.0, 0.0, -5.0));
    world.resource_mut::<AudioLevel>().status = MicStatus::Starting;
    world.resource_mut::<InputState>().direction_right.active = true;
    let mut schedule = tick_gameplay_schedule();

    send_mic(
        &mut world,
        vec![MicMessage::Started, MicMessage::Level { level: 50.0 }],
    );
    update_world_time(&mut world, 0.1);
    schedule.run(&mut world);

    assert!(world.resource::<AudioLevel>().loud);
    let pose = *world.get::<AvatarPose>(avatar).unwrap();
    assert_eq!(pose.emotion, EmotionalState::Crying);
    assert_eq!(pose.movement, MovementState::Walking);
    assert_eq!(pose.anim(), AvatarAnim::Crying);
    let counters = *world.get::<AvatarAnimation>(avatar).unwrap();
    assert!(counters.cry_time > 0.0);
    assert_eq!(counters.walk_time, 0.0);

    send_mic(&mut world, vec![MicMessage::Level { level: 10.0 }]);
    update_world_time(&mut world, 0.1);
    schedule.run(&mut world);

    let pose = *world.get::<AvatarPose>(avatar).unwrap();
    assert_eq!(pose.anim(), AvatarAnim::Walking);
    let counters = *world.get::<AvatarAnimation>(avatar).unwrap();
    assert_eq!(counters.cry_time, 0.0);
    assert!(counters.walk_time > 0.0);
}

#[test]
fn levels_before_the_mic_is_listening_are_ignored() {
    let (mut world, avatar) = make_playing_world(Vector3::new(0.0, 0.0, -5.0));
    let mut schedule = tick_gameplay_schedule();

    send_mic(&mut world, vec![MicMessage::Level { level: 200.0 }]);
    update_world_time(&mut world, 0.1);
    schedule.run(&mut world);

    assert!(!world.resource::<AudioLevel>().loud);
    assert_eq!(
        world.get::<AvatarPose>(avatar).unwrap().emotion,
        EmotionalState::Neutral
    );
}

#[test]
fn denied_microphone_keeps_the_baby_calm() {
    let (mut world, _avatar) = make_playing_world(Vector3::new(0.0, 0.0, -5.0));
    world.resource_mut::<AudioLevel>().status = MicStatus::Starting;
    let mut schedule = tick_gameplay_schedule();

    send_mic(
        &mut world,
        vec![MicMessage::Denied {
            reason: "no input device".to_string(),
        }],
    );
    update_world_time(&mut world, 0.1);
    schedule.run(&mut world);
    world.flush();

    let audio = world.resource::<AudioLevel>();
    assert!(matches!(audio.status, MicStatus::Unavailable(_)));
    assert!(!audio.loud);
    assert_eq!(
        toast_texts(&mut world),
        vec!["Microphone access denied".to_string()]
    );
}

// =============================================================================
// Cry sound
// =============================================================================

#[test]
fn cry_sound_starts_once_and_stops_when_quiet() {
    let (mut world, _avatar) = make_playing_world(Vector3::new(0.0, 0.0, -5.0));
    world.resource_mut::<AudioLevel>().status = MicStatus::Listening;
    let mut schedule = Schedule::default();
    schedule.add_systems((apply_mic_messages, cry_sound_system).chain());
    let mut cmds = SystemState::<MessageReader<SoundCmd>>::new(&mut world);

    let mut tick = |world: &mut World, level: f32| -> Vec<SoundCmd> {
        send_mic(world, vec![MicMessage::Level { level }]);
        schedule.run(world);
        cmds.get_mut(world).read().copied().collect()
    };

    assert_eq!(tick(&mut world, 10.0), Vec::<SoundCmd>::new());
    assert_eq!(tick(&mut world, 120.0), vec![SoundCmd::CryOn]);
    // still loud: the playback thread keeps repeating on its own
    assert_eq!(tick(&mut world, 130.0), Vec::<SoundCmd>::new());
    assert!(world.resource::<SoundState>().crying);
    assert_eq!(tick(&mut world, 5.0), vec![SoundCmd::CryOff]);
    assert_eq!(tick(&mut world, 5.0), Vec::<SoundCmd>::new());
    assert!(!world.resource::<SoundState>().crying);
}
