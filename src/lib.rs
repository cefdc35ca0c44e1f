//! Gravity Gun - a first-person inventory character in Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, RON data loading
//! - **Input**: Named action/axis bindings turned into `PlayerAction` events
//! - **Player**: First-person character, camera, body mesh, action handling
//! - **Inventory**: Pickup raycast and equipped item bookkeeping
//! - **Weapons**: Equippable items (the gravity gun) and the viewmodel layer
//! - **World**: Data-driven test level with props and items
//! - **UI**: Crosshair, pickup prompt and on-screen messages

pub mod core;
pub mod input;
pub mod inventory;
pub mod player;
pub mod ui;
pub mod weapons;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct GravityGunPlugin;

impl Plugin for GravityGunPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Input bindings
            .add_plugins(input::InputPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Inventory bookkeeping
            .add_plugins(inventory::InventoryPlugin)

            // Equippable items
            .add_plugins(weapons::WeaponsPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
