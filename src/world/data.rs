//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{load_ron, DataLoadError};

const LEVEL_PATH: &str = "assets/data/levels/test_range.ron";

/// Shapes of physics props.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropKind {
    Crate,
    Barrel,
    Ball,
}

/// Items that can be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ItemKind {
    GravityGun,
}

/// A static wall block.
#[derive(Debug, Clone, Deserialize)]
pub struct WallDef {
    pub position: (f32, f32, f32),
    pub size: (f32, f32, f32),
}

/// A dynamic physics prop.
#[derive(Debug, Clone, Deserialize)]
pub struct PropDef {
    pub kind: PropKind,
    pub position: (f32, f32, f32),
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Mass in kilograms; derived from the collider when absent
    #[serde(default)]
    pub mass: Option<f32>,
}

/// A pickup item placed in the level.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDef {
    pub kind: ItemKind,
    pub position: (f32, f32, f32),
}

fn default_scale() -> f32 {
    1.0
}

fn default_ambient_brightness() -> f32 {
    300.0
}

/// A complete level definition.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    /// Floor extent along X and Z
    pub floor_size: (f32, f32),
    pub player_start: (f32, f32, f32),
    #[serde(default = "default_ambient_brightness")]
    pub ambient_brightness: f32,
    #[serde(default)]
    pub walls: Vec<WallDef>,
    #[serde(default)]
    pub props: Vec<PropDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
}

impl Default for LevelDefinition {
    fn default() -> Self {
        let crate_at = |x, z| PropDef {
            kind: PropKind::Crate,
            position: (x, 0.5, z),
            scale: 1.0,
            mass: None,
        };

        Self {
            name: "Test Range".to_string(),
            floor_size: (40.0, 40.0),
            player_start: (0.0, 1.2, 6.0),
            ambient_brightness: default_ambient_brightness(),
            walls: vec![
                WallDef { position: (0.0, 2.0, -20.0), size: (40.0, 4.0, 0.5) },
                WallDef { position: (0.0, 2.0, 20.0), size: (40.0, 4.0, 0.5) },
                WallDef { position: (-20.0, 2.0, 0.0), size: (0.5, 4.0, 40.0) },
                WallDef { position: (20.0, 2.0, 0.0), size: (0.5, 4.0, 40.0) },
                // Plinth for the gun
                WallDef { position: (0.0, 0.5, 2.0), size: (1.0, 1.0, 1.0) },
            ],
            props: vec![
                crate_at(-3.0, -2.0),
                crate_at(-3.0, -3.2),
                crate_at(3.0, -4.0),
                PropDef {
                    kind: PropKind::Barrel,
                    position: (1.5, 0.6, -6.0),
                    scale: 1.0,
                    mass: None,
                },
                PropDef {
                    kind: PropKind::Ball,
                    position: (-1.0, 0.4, -8.0),
                    scale: 0.8,
                    mass: Some(2.0),
                },
            ],
            items: vec![ItemDef {
                kind: ItemKind::GravityGun,
                position: (0.0, 1.3, 2.0),
            }],
        }
    }
}

impl LevelDefinition {
    pub fn load() -> Result<Self, DataLoadError> {
        load_ron(LEVEL_PATH)
    }

    pub fn player_start(&self) -> Vec3 {
        Vec3::from(self.player_start)
    }
}

/// Load the level definition at startup. A missing file falls back to the built-in test range.
pub fn load_level_definition(mut commands: Commands) {
    let level = match LevelDefinition::load() {
        Ok(level) => {
            info!("Loaded level: {}", level.name);
            level
        }
        Err(DataLoadError::FileNotFound(path)) => {
            warn!("Level file {} not found, using built-in test range", path);
            LevelDefinition::default()
        }
        Err(e) => {
            error!("{}. Using built-in test range.", e);
            LevelDefinition::default()
        }
    };
    commands.insert_resource(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;

    #[test]
    fn level_parses_with_defaults() {
        let text = r#"(
            name: "Tiny",
            floor_size: (10.0, 10.0),
            player_start: (0.0, 1.0, 0.0),
            props: [
                (kind: Crate, position: (1.0, 0.5, 1.0)),
            ],
            items: [
                (kind: GravityGun, position: (0.0, 1.0, -2.0)),
            ],
        )"#;
        let level: LevelDefinition = parse_ron("inline", text).unwrap();

        assert_eq!(level.name, "Tiny");
        assert!(level.walls.is_empty());
        assert_eq!(level.props[0].scale, 1.0);
        assert_eq!(level.props[0].mass, None);
        assert_eq!(level.items[0].kind, ItemKind::GravityGun);
        assert_eq!(level.player_start(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn built_in_level_has_a_gun() {
        let level = LevelDefinition::default();
        assert!(level.items.iter().any(|item| item.kind == ItemKind::GravityGun));
    }

    #[test]
    fn shipped_level_parses() {
        let level: LevelDefinition =
            parse_ron(LEVEL_PATH, include_str!("../../assets/data/levels/test_range.ron")).unwrap();
        assert_eq!(level.items.len(), 1);
        assert!(level.props.iter().any(|prop| prop.kind == PropKind::Ball));
    }
}
