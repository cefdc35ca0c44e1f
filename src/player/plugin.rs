//! Player plugin - character actions, movement, and camera.

use bevy::prelude::*;

use super::character::*;
use super::components::*;
use super::movement::*;
use crate::core::GameState;

/// Per-frame ordering for the player character.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerSet {
    /// Raw input becomes `PlayerAction` events
    Input,
    /// Actions are forwarded to the inventory and equipped item
    Actions,
    /// Per-frame tick (inventory raycast, hooks)
    Tick,
    /// Accumulated input moves the character
    Movement,
}

/// Player plugin - handles character actions, movement, and camera.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .add_systems(Startup, load_player_config)
            .add_systems(OnEnter(GameState::InGame), grab_cursor)
            .add_systems(OnExit(GameState::InGame), release_cursor)
            .configure_sets(
                Update,
                (
                    PlayerSet::Input,
                    PlayerSet::Actions,
                    PlayerSet::Tick,
                    PlayerSet::Movement,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (handle_movement_actions, pick_up_item, drop_item, fire_equipped_item)
                    .chain()
                    .in_set(PlayerSet::Actions),
            )
            .add_systems(
                Update,
                (character_tick, on_overlap_begin, setup_body_animation).in_set(PlayerSet::Tick),
            )
            .add_systems(
                Update,
                (apply_look_input, apply_movement_input)
                    .chain()
                    .in_set(PlayerSet::Movement),
            );
    }
}
