//! World plugin - level loading and setup.

use bevy::prelude::*;

use crate::core::GameState;
use crate::player::{spawn_player, Player, PlayerConfig};
use crate::weapons::GravityGunConfig;

use super::builder::build_level_from_data;
use super::data::{load_level_definition, LevelDefinition};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelDefinition>()
            .add_systems(Startup, load_level_definition)
            .add_systems(OnEnter(GameState::InGame), setup_level);
    }
}

/// Set up the level from data.
///
/// Unpausing re-enters InGame, so the level is only built when no player exists yet.
#[allow(clippy::too_many_arguments)]
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    level: Res<LevelDefinition>,
    player_config: Res<PlayerConfig>,
    gun_config: Res<GravityGunConfig>,
    existing_players: Query<(), With<Player>>,
) {
    if !existing_players.is_empty() {
        return;
    }

    info!("Building level: {}", level.name);

    let player_pos = build_level_from_data(&mut commands, &mut meshes, &mut materials, &level, &gun_config);

    spawn_player(
        &mut commands,
        &mut meshes,
        &mut materials,
        &asset_server,
        player_pos,
        &player_config,
    );
}
