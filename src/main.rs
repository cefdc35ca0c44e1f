//! Gravity Gun - Entry Point
//!
//! A first-person sandbox: pick up the gravity gun, grab physics props and
//! throw them around.
//!
//! Controls:
//! - WASD: Move
//! - Mouse / right stick: Look around
//! - Space: Jump
//! - E: Pick up the item under the crosshair
//! - Q: Drop the equipped item
//! - Left click: Launch
//! - Right click: Attract
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Gravity Gun".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(gravity_gun::GravityGunPlugin)

        .run();
}
