//! Input plugin - bindings and action sampling.

use bevy::prelude::*;

use super::actions::{read_player_input, PlayerAction};
use super::bindings::{load_input_bindings, InputBindings};
use crate::core::GameState;
use crate::player::PlayerSet;

/// Input plugin - turns raw input into `PlayerAction` events.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputBindings>()
            .add_event::<PlayerAction>()
            .add_systems(Startup, load_input_bindings)
            .add_systems(
                Update,
                read_player_input
                    .in_set(PlayerSet::Input)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
