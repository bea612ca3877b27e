//! Collectible toys.
//!
//! An [`Interactable`] is one toy from the manifest. Its position is authored
//! in the toy room's local space; gameplay maps it to world space through the
//! room's [`RoomTransform`](crate::resources::roomtransform::RoomTransform)
//! before any distance check.

use raylib::prelude::{Color, Vector3};
use serde::{Deserialize, Serialize};

/// Geometry tag consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToyShape {
    Box,
    Sphere,
    Pyramid,
    Cylinder,
}

/// A toy that can be picked up once and stored in the chest.
#[derive(Debug, Clone, PartialEq)]
pub struct Interactable {
    pub id: u32,
    pub local_position: Vector3,
    pub shape: ToyShape,
    pub color: Color,
    /// Flips false -> true on pickup and never reverts.
    pub collected: bool,
}

impl Interactable {
    pub fn new(id: u32, local_position: Vector3, shape: ToyShape, color: Color) -> Self {
        Self {
            id,
            local_position,
            shape,
            color,
            collected: false,
        }
    }
}

/// Parse a `#rrggbb` (or `rrggbb`) string into an opaque colour.
pub fn parse_hex_color(hex: &str) -> Result<Color, String> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(format!("Invalid colour '{}': expected #rrggbb", hex));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| format!("Invalid colour '{}': {}", hex, e))
    };
    Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_toy_is_not_collected() {
        let toy = Interactable::new(1, Vector3::new(-2.0, 0.15, -3.0), ToyShape::Box, Color::RED);
        assert!(!toy.collected);
        assert_eq!(toy.id, 1);
    }

    #[test]
    fn test_parse_hex_color() {
        let c = parse_hex_color("#ff6b6b").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (255, 107, 107, 255));
        let c = parse_hex_color("4ecdc4").unwrap();
        assert_eq!((c.r, c.g, c.b), (0x4e, 0xcd, 0xc4));
    }

    #[test]
    fn test_parse_hex_color_rejects_garbage() {
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_shape_serde_names() {
        let shape: ToyShape = serde_json::from_str("\"pyramid\"").unwrap();
        assert_eq!(shape, ToyShape::Pyramid);
        assert_eq!(serde_json::to_string(&ToyShape::Cylinder).unwrap(), "\"cylinder\"");
    }
}
