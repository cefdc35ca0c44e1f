//! Weapons plugin - equippable items and the viewmodel layer.

use bevy::prelude::*;

use super::gravity_gun::{load_gravity_gun_config, update_held_objects, GravityGunConfig};
use super::viewmodel::{propagate_viewmodel_render_layers, return_items_to_world_layer};
use crate::core::GameState;
use crate::player::PlayerSet;

/// Weapons plugin - handles held props and viewmodel rendering.
pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GravityGunConfig>()
            .add_systems(Startup, load_gravity_gun_config)
            .add_systems(
                Update,
                (
                    update_held_objects,
                    propagate_viewmodel_render_layers,
                    return_items_to_world_layer,
                )
                    .after(PlayerSet::Actions)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
