//! Rendering.
//!
//! A pure consumer of the world: it reads the avatar pose, the uncollected
//! toys, the HUD model and toasts and draws them with Raylib. Nothing here
//! mutates gameplay state.
//!
//! Body parts are placed by rotating local offsets with the avatar's facing,
//! so the baby turns even though Raylib's primitive shapes are axis aligned.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::avatar::{Avatar, AvatarAnim, AvatarAnimation, AvatarPose};
use crate::components::interactable::{Interactable, ToyShape, parse_hex_color};
use crate::components::toast::Toast;
use crate::resources::audiolevel::{AudioLevel, MicStatus};
use crate::resources::avatarlook::{AvatarLook, CLOTHES_SWATCHES, Gender, SKIN_SWATCHES};
use crate::resources::camera3d::FollowCamera;
use crate::resources::debugmode::DebugMode;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::hud::Hud;
use crate::resources::inventory::ToyInventory;
use crate::resources::rooms::{Room, RoomLayout};
use crate::resources::roomtransform::{planar_distance, rotate_yaw};
use crate::resources::screensize::ScreenSize;

const BACKGROUND: Color = Color::new(135, 206, 235, 255);
const CHEST_COLOR: Color = Color::new(139, 90, 43, 255);
const TEAR_COLOR: Color = Color::new(100, 180, 255, 255);
const TOY_SIZE: f32 = 0.3;

/// Floor rectangle of a room: (center z, depth) in world units, all 16 wide.
fn floor_extent(room: Room) -> (f32, f32) {
    match room {
        Room::Bedroom => (-2.5, 15.0),
        Room::LivingRoom => (10.0, 10.0),
        Room::Bathroom => (21.5, 13.0),
    }
}

fn floor_color(room: Room) -> Color {
    match room {
        Room::Bedroom => Color::new(255, 228, 225, 255),
        Room::LivingRoom => Color::new(245, 222, 179, 255),
        Room::Bathroom => Color::new(224, 255, 255, 255),
    }
}

/// Draw the frame for the current game state.
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    state: Res<GameState>,
    screen: Res<ScreenSize>,
    look: Res<AvatarLook>,
    audio: Res<AudioLevel>,
    camera: Option<Res<FollowCamera>>,
    inventory: Option<Res<ToyInventory>>,
    layout: Option<Res<RoomLayout>>,
    hud: Option<Res<Hud>>,
    avatar: Query<(&AvatarPose, &AvatarAnimation), With<Avatar>>,
    toasts: Query<&Toast>,
    debug: Option<Res<DebugMode>>,
) {
    let mut d = rl.begin_drawing(&th);
    d.clear_background(BACKGROUND);

    match state.get() {
        GameStates::Home => draw_home(&mut d, &screen, &look),
        GameStates::Playing => {
            if let (Some(camera), Some(inventory), Some(layout)) =
                (camera.as_deref(), inventory.as_deref(), layout.as_deref())
            {
                let mut d3 = d.begin_mode3D(camera.to_raylib());
                draw_house(&mut d3, layout);
                draw_toys(&mut d3, inventory.uncollected(), layout);
                for (pose, anim) in avatar.iter() {
                    draw_avatar(&mut d3, pose, anim, &look);
                }
            }
            if let Some(hud) = hud {
                draw_hud(&mut d, &screen, &hud, &audio);
            }
            if debug.is_some() {
                let pose = avatar.iter().next().map(|(pose, _)| pose);
                draw_debug(&mut d, &screen, pose, &audio, layout.as_deref());
            }
        }
        _ => {}
    }

    for toast in toasts.iter() {
        draw_toast(&mut d, &screen, &toast.text);
    }
}

fn draw_house(d: &mut RaylibMode3D<RaylibDrawHandle>, layout: &RoomLayout) {
    for room in Room::ALL {
        let (center_z, depth) = floor_extent(room);
        d.draw_plane(
            Vector3::new(0.0, 0.0, center_z),
            Vector2::new(16.0, depth),
            floor_color(room),
        );
    }
    let chest = layout.chest_world();
    let chest_center = Vector3::new(chest.x, 0.5, chest.z);
    d.draw_cube(chest_center, 1.5, 1.0, 1.0, CHEST_COLOR);
    d.draw_cube_wires(chest_center, 1.5, 1.0, 1.0, Color::BLACK);
}

fn draw_toys<'a>(
    d: &mut RaylibMode3D<RaylibDrawHandle>,
    toys: impl Iterator<Item = &'a Interactable>,
    layout: &RoomLayout,
) {
    let size = TOY_SIZE * layout.toy_room.scale;
    for toy in toys {
        let pos = layout.toy_room.to_world(toy.local_position);
        match toy.shape {
            ToyShape::Box => d.draw_cube(pos, size, size, size, toy.color),
            ToyShape::Sphere => d.draw_sphere(pos, size * 0.5, toy.color),
            ToyShape::Pyramid => {
                let base = Vector3::new(pos.x, pos.y - size * 0.5, pos.z);
                d.draw_cylinder(base, 0.0, size * 0.6, size, 4, toy.color)
            }
            ToyShape::Cylinder => {
                let base = Vector3::new(pos.x, pos.y - size * 0.5, pos.z);
                d.draw_cylinder(base, size * 0.4, size * 0.4, size, 12, toy.color)
            }
        }
    }
}

/// World point of a body part given as an offset in the avatar's own frame.
fn part(pose: &AvatarPose, local: Vector3) -> Vector3 {
    pose.position + rotate_yaw(local, pose.facing)
}

fn draw_avatar(
    d: &mut RaylibMode3D<RaylibDrawHandle>,
    pose: &AvatarPose,
    anim: &AvatarAnimation,
    look: &AvatarLook,
) {
    let skin = look.skin_color();
    let clothes = look.clothes_color();
    let swing = anim.walk_time.sin() * 0.15;
    let shake = match pose.anim() {
        AvatarAnim::Crying => anim.cry_time.sin() * 0.08,
        _ => 0.0,
    };

    // body and head
    d.draw_cube(part(pose, Vector3::new(0.0, 0.75, 0.0)), 0.6, 0.6, 0.4, clothes);
    let head = part(pose, Vector3::new(shake, 1.35, 0.0));
    d.draw_sphere(head, 0.35, skin);

    // arms and legs swing in opposite phase
    for (side, phase) in [(-1.0f32, 1.0f32), (1.0, -1.0)] {
        let arm = part(pose, Vector3::new(side * 0.4, 0.55, swing * phase));
        d.draw_cylinder(arm, 0.08, 0.08, 0.4, 8, skin);
        let leg = part(pose, Vector3::new(side * 0.15, 0.05, -swing * phase));
        d.draw_cylinder(leg, 0.1, 0.1, 0.4, 8, clothes);
    }

    if look.gender == Gender::Girl {
        d.draw_sphere(part(pose, Vector3::new(0.0, 1.7, -0.1)), 0.12, Color::PINK);
    }

    if pose.anim() == AvatarAnim::Crying {
        let drop = (anim.cry_time * 0.5).fract() * 0.4;
        for side in [-1.0f32, 1.0] {
            let tear = part(pose, Vector3::new(side * 0.15, 1.3 - drop, -0.3));
            d.draw_sphere(tear, 0.05, TEAR_COLOR);
        }
    }
}

fn mic_line(audio: &AudioLevel) -> String {
    match &audio.status {
        MicStatus::Off => "Mic: off (M to turn on)".to_string(),
        MicStatus::Starting => "Mic: starting...".to_string(),
        MicStatus::Listening => format!("Mic: listening ({:.0})", audio.level),
        MicStatus::Unavailable(_) => "Mic: unavailable".to_string(),
    }
}

fn draw_hud(d: &mut RaylibDrawHandle, screen: &ScreenSize, hud: &Hud, audio: &AudioLevel) {
    d.draw_rectangle(0, 0, 320, 112, Color::new(255, 255, 255, 180));
    d.draw_text(&hud.room_line(), 10, 10, 20, Color::DARKGRAY);
    d.draw_text(&hud.inventory_line(), 10, 36, 20, Color::DARKGRAY);
    d.draw_text(&mic_line(audio), 10, 62, 18, Color::DARKGRAY);
    d.draw_text(hud.sound_line(), 10, 86, 18, Color::DARKGRAY);
    d.draw_text(
        "Arrows: move   A: pick up   B: store   M: mic   N: audio   Esc: home",
        10,
        screen.h - 26,
        16,
        Color::DARKGRAY,
    );
}

fn draw_toast(d: &mut RaylibDrawHandle, screen: &ScreenSize, text: &str) {
    let font_size = 24;
    let width = text.len() as i32 * font_size / 2 + 40;
    let x = (screen.w - width) / 2;
    d.draw_rectangle(x, 100, width, 44, Color::new(0, 0, 0, 170));
    d.draw_text(text, x + 20, 110, font_size, Color::WHITE);
}

fn draw_swatches(
    d: &mut RaylibDrawHandle,
    swatches: &[(&str, &str)],
    selected: usize,
    y: i32,
    screen: &ScreenSize,
) {
    let size = 48;
    let gap = 16;
    let count = swatches.len() as i32;
    let start_x = (screen.w - (count * size + (count - 1) * gap)) / 2;
    for (i, (name, hex)) in swatches.iter().enumerate() {
        let x = start_x + i as i32 * (size + gap);
        let color = parse_hex_color(hex).unwrap_or(Color::WHITE);
        d.draw_rectangle(x, y, size, size, color);
        if i == selected % swatches.len() {
            d.draw_rectangle_lines(x - 3, y - 3, size + 6, size + 6, Color::BLACK);
            d.draw_text(name, x, y + size + 6, 14, Color::DARKGRAY);
        }
    }
}

fn draw_home(d: &mut RaylibDrawHandle, screen: &ScreenSize, look: &AvatarLook) {
    let cx = screen.w / 2;
    d.draw_text("Baby Home", cx - 110, 40, 44, Color::DARKBLUE);

    // preview
    d.draw_rectangle(cx - 30, 150, 60, 70, look.clothes_color());
    d.draw_circle(cx, 125, 32.0, look.skin_color());
    if look.gender == Gender::Girl {
        d.draw_circle(cx + 22, 95, 10.0, Color::PINK);
    }
    d.draw_text(look.gender.label(), cx - 20, 230, 22, Color::DARKGRAY);

    d.draw_text("Skin (Left/Right)", cx - 80, 270, 18, Color::DARKGRAY);
    draw_swatches(d, &SKIN_SWATCHES, look.skin, 295, screen);
    d.draw_text("Clothes (Up/Down)", cx - 80, 375, 18, Color::DARKGRAY);
    draw_swatches(d, &CLOTHES_SWATCHES, look.clothes, 400, screen);

    d.draw_text(
        "G: boy/girl   Enter: play",
        cx - 120,
        screen.h - 40,
        20,
        Color::DARKGRAY,
    );
}

fn draw_debug(
    d: &mut RaylibDrawHandle,
    screen: &ScreenSize,
    pose: Option<&AvatarPose>,
    audio: &AudioLevel,
    layout: Option<&RoomLayout>,
) {
    let x = screen.w - 300;
    d.draw_fps(x, 10);
    if let Some(pose) = pose {
        let p = pose.position;
        d.draw_text(
            &format!("pos ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
            x,
            34,
            16,
            Color::BLACK,
        );
        d.draw_text(
            &format!("facing {:.2}  anim {:?}", pose.facing, pose.anim()),
            x,
            54,
            16,
            Color::BLACK,
        );
        if let Some(layout) = layout {
            d.draw_text(
                &format!("chest {:.2}", planar_distance(p, layout.chest_world())),
                x,
                74,
                16,
                Color::BLACK,
            );
        }
    }
    d.draw_text(
        &format!("level {:.1}  loud {}", audio.level, audio.loud),
        x,
        94,
        16,
        Color::BLACK,
    );
}
