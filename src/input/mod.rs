//! Input module - named bindings and player actions.

mod actions;
mod bindings;
mod plugin;

pub use actions::{collect_actions, PlayerAction};
pub use bindings::{AxisAction, AxisBinding, AxisSource, ButtonAction, ButtonSource, InputBindings, InputSnapshot};
pub use plugin::InputPlugin;
