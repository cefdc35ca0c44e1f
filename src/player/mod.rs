//! Player module - the first-person character, its actions, movement and camera.

mod character;
mod components;
mod movement;
mod plugin;

pub use components::*;
pub use movement::{spawn_player, PlayerCamera, ViewmodelCamera};
pub use plugin::{PlayerPlugin, PlayerSet};
