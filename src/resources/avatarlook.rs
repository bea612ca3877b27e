//! Avatar customization chosen on the home screen.
//!
//! The look survives "back to home" so the player returns to the same baby.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Color;

use crate::components::interactable::parse_hex_color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Boy,
    Girl,
}

impl Gender {
    pub fn toggled(self) -> Self {
        match self {
            Gender::Boy => Gender::Girl,
            Gender::Girl => Gender::Boy,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Boy => "Boy",
            Gender::Girl => "Girl",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boy" => Ok(Gender::Boy),
            "girl" => Ok(Gender::Girl),
            other => Err(format!("Unknown gender '{}'", other)),
        }
    }
}

/// (name, hex) swatches offered for skin.
pub const SKIN_SWATCHES: [(&str, &str); 5] = [
    ("Light", "#ffd7b5"),
    ("Medium", "#e8b896"),
    ("Tan", "#d4a574"),
    ("Brown", "#a67c52"),
    ("Dark", "#8b6f47"),
];

/// (name, hex) swatches offered for clothes.
pub const CLOTHES_SWATCHES: [(&str, &str); 6] = [
    ("Blue", "#b3e5fc"),
    ("Pink", "#ffb6c1"),
    ("Yellow", "#ffe66d"),
    ("Green", "#95e1d3"),
    ("Purple", "#d4a5d4"),
    ("Orange", "#ffb88c"),
];

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvatarLook {
    pub gender: Gender,
    /// Index into [`SKIN_SWATCHES`].
    pub skin: usize,
    /// Index into [`CLOTHES_SWATCHES`].
    pub clothes: usize,
}

impl AvatarLook {
    pub fn skin_color(&self) -> Color {
        swatch_color(&SKIN_SWATCHES, self.skin)
    }

    pub fn clothes_color(&self) -> Color {
        swatch_color(&CLOTHES_SWATCHES, self.clothes)
    }

    pub fn skin_name(&self) -> &'static str {
        SKIN_SWATCHES[self.skin % SKIN_SWATCHES.len()].0
    }

    pub fn clothes_name(&self) -> &'static str {
        CLOTHES_SWATCHES[self.clothes % CLOTHES_SWATCHES.len()].0
    }

    /// Step the skin swatch forwards (`+1`) or backwards (`-1`), wrapping.
    pub fn cycle_skin(&mut self, step: i32) {
        self.skin = wrap(self.skin, step, SKIN_SWATCHES.len());
    }

    pub fn cycle_clothes(&mut self, step: i32) {
        self.clothes = wrap(self.clothes, step, CLOTHES_SWATCHES.len());
    }

    /// Select swatches by hex value, as written in the config file.
    pub fn with_hex(mut self, skin_hex: Option<&str>, clothes_hex: Option<&str>) -> Result<Self, String> {
        if let Some(hex) = skin_hex {
            self.skin = find_swatch(&SKIN_SWATCHES, hex)?;
        }
        if let Some(hex) = clothes_hex {
            self.clothes = find_swatch(&CLOTHES_SWATCHES, hex)?;
        }
        Ok(self)
    }
}

fn swatch_color(swatches: &[(&str, &str)], index: usize) -> Color {
    let (_, hex) = swatches[index % swatches.len()];
    parse_hex_color(hex).unwrap_or(Color::WHITE)
}

fn find_swatch(swatches: &[(&str, &str)], hex: &str) -> Result<usize, String> {
    let wanted = parse_hex_color(hex)?;
    swatches
        .iter()
        .position(|(_, candidate)| parse_hex_color(candidate).ok() == Some(wanted))
        .ok_or_else(|| format!("Colour {} is not one of the offered swatches", hex))
}

fn wrap(index: usize, step: i32, len: usize) -> usize {
    (index as i64 + step as i64).rem_euclid(len as i64) as usize
}
