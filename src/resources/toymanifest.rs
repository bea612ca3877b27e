//! Toy manifest loading.
//!
//! The set of toys is fixed for a session and created from a manifest. A
//! built-in manifest ships with the game; a JSON file with the same shape can
//! replace it:
//!
//! ```json
//! [
//!   { "id": 1, "position": [-2.0, 0.15, -3.0], "shape": "box", "color": "#ff6b6b" }
//! ]
//! ```
//!
//! Positions are in toy-room local space. Duplicate ids or bad colours are
//! rejected at load time.

use bevy_ecs::prelude::Resource;
use log::info;
use raylib::prelude::{Color, Vector3};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::interactable::{Interactable, ToyShape, parse_hex_color};

/// One manifest entry as written on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToyEntry {
    pub id: u32,
    pub position: [f32; 3],
    pub shape: ToyShape,
    pub color: String,
}

/// Validated manifest, kept as a resource so each new session starts from it.
///
/// Entries are turned into uncollected [`Interactable`] templates while they
/// are validated, so colours are parsed exactly once.
#[derive(Resource, Debug, Clone)]
pub struct ToyManifest {
    toys: Vec<Interactable>,
}

const BUILTIN_TOYS: [(u32, [f32; 3], ToyShape, Color); 8] = [
    (1, [-2.0, 0.15, -3.0], ToyShape::Box, Color::new(0xff, 0x6b, 0x6b, 0xff)),
    (2, [3.0, 0.1, -2.0], ToyShape::Sphere, Color::new(0x4e, 0xcd, 0xc4, 0xff)),
    (3, [-4.0, 0.2, -5.0], ToyShape::Pyramid, Color::new(0xff, 0xe6, 0x6d, 0xff)),
    (4, [2.0, 0.15, -6.0], ToyShape::Cylinder, Color::new(0x95, 0xe1, 0xd3, 0xff)),
    (5, [-6.0, 0.15, -2.0], ToyShape::Box, Color::new(0xd4, 0xa5, 0xd4, 0xff)),
    (6, [4.0, 0.1, -8.0], ToyShape::Sphere, Color::new(0xff, 0xb8, 0x8c, 0xff)),
    (7, [1.0, 0.2, -1.0], ToyShape::Pyramid, Color::new(0xb3, 0xe5, 0xfc, 0xff)),
    (8, [-3.0, 0.15, -7.0], ToyShape::Cylinder, Color::new(0xff, 0xb6, 0xc1, 0xff)),
];

fn toy_template(id: u32, position: [f32; 3], shape: ToyShape, color: Color) -> Interactable {
    let [x, y, z] = position;
    Interactable::new(id, Vector3::new(x, y, z), shape, color)
}

impl Default for ToyManifest {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ToyManifest {
    /// The eight bedroom toys.
    pub fn builtin() -> Self {
        let toys = BUILTIN_TOYS
            .iter()
            .map(|&(id, position, shape, color)| toy_template(id, position, shape, color))
            .collect();
        Self { toys }
    }

    /// Build a manifest from entries, rejecting empty sets, duplicate ids and
    /// unparsable colours.
    pub fn from_entries(entries: Vec<ToyEntry>) -> Result<Self, String> {
        if entries.is_empty() {
            return Err("Toy manifest is empty".to_string());
        }
        let mut seen: FxHashSet<u32> = FxHashSet::default();
        let mut toys = Vec::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.id) {
                return Err(format!("Duplicate toy id {} in manifest", entry.id));
            }
            let color =
                parse_hex_color(&entry.color).map_err(|e| format!("Toy {}: {}", entry.id, e))?;
            toys.push(toy_template(entry.id, entry.position, entry.shape, color));
        }
        Ok(Self { toys })
    }

    /// Parse a JSON array of [`ToyEntry`].
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let entries: Vec<ToyEntry> =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse toy manifest: {}", e))?;
        Self::from_entries(entries)
    }

    /// Load and validate a manifest file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read toy manifest {:?}: {}", path, e))?;
        let manifest = Self::from_json_str(&json)?;
        info!("Loaded {} toys from {:?}", manifest.len(), path);
        Ok(manifest)
    }

    pub fn len(&self) -> usize {
        self.toys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toys.is_empty()
    }

    /// Fresh, uncollected toys for a new session.
    pub fn spawn_toys(&self) -> Vec<Interactable> {
        self.toys.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_eight_unique_toys() {
        let manifest = ToyManifest::builtin();
        assert_eq!(manifest.len(), 8);
        let toys = manifest.spawn_toys();
        let ids: FxHashSet<u32> = toys.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 8);
        assert_eq!(toys[0].color, Color::new(0xff, 0x6b, 0x6b, 0xff));
        assert_eq!(toys[7].color, Color::new(0xff, 0xb6, 0xc1, 0xff));
    }

    #[test]
    fn test_entry_colours_are_parsed_once_and_kept() {
        let entries = vec![
            ToyEntry {
                id: 4,
                position: [0.5, 0.1, -1.0],
                shape: ToyShape::Cylinder,
                color: "#0a0b0c".to_string(),
            },
            ToyEntry {
                id: 9,
                position: [0.0, 0.0, 0.0],
                shape: ToyShape::Sphere,
                color: "FFFFFF".to_string(),
            },
        ];
        let manifest = ToyManifest::from_entries(entries).unwrap();
        let toys = manifest.spawn_toys();
        assert_eq!(toys[0].color, Color::new(0x0a, 0x0b, 0x0c, 0xff));
        assert_eq!(toys[1].color, Color::new(0xff, 0xff, 0xff, 0xff));
        // every session gets the same colours and a clean collected flag
        let again = manifest.spawn_toys();
        assert_eq!(again[0].color, toys[0].color);
        assert!(again.iter().all(|t| !t.collected));
    }

    #[test]
    fn test_spawn_toys_are_uncollected_and_ordered() {
        let toys = ToyManifest::builtin().spawn_toys();
        assert_eq!(toys.len(), 8);
        assert!(toys.iter().all(|t| !t.collected));
        let ids: Vec<u32> = toys.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(toys[2].shape, ToyShape::Pyramid);
        assert!((toys[0].local_position.z + 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_json_manifest() {
        let json = r##"[
            { "id": 10, "position": [1.0, 0.0, 2.0], "shape": "sphere", "color": "#102030" },
            { "id": 11, "position": [0.0, 0.0, 0.0], "shape": "box", "color": "ffffff" }
        ]"##;
        let manifest = ToyManifest::from_json_str(json).unwrap();
        assert_eq!(manifest.len(), 2);
        let toys = manifest.spawn_toys();
        assert_eq!(toys[0].color.r, 0x10);
        assert_eq!(toys[1].shape, ToyShape::Box);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r##"[
            { "id": 1, "position": [1.0, 0.0, 2.0], "shape": "sphere", "color": "#102030" },
            { "id": 1, "position": [0.0, 0.0, 0.0], "shape": "box", "color": "#ffffff" }
        ]"##;
        let err = ToyManifest::from_json_str(json).unwrap_err();
        assert!(err.contains("Duplicate toy id 1"));
    }

    #[test]
    fn test_bad_shape_and_empty_rejected() {
        let json = r##"[{ "id": 1, "position": [0.0, 0.0, 0.0], "shape": "torus", "color": "#ffffff" }]"##;
        assert!(ToyManifest::from_json_str(json).is_err());
        assert!(ToyManifest::from_json_str("[]").is_err());
    }

    #[test]
    fn test_bad_color_rejected() {
        let json = r##"[{ "id": 3, "position": [0.0, 0.0, 0.0], "shape": "box", "color": "pink" }]"##;
        let err = ToyManifest::from_json_str(json).unwrap_err();
        assert!(err.starts_with("Toy 3"));
    }
}
