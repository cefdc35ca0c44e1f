//! UI module - HUD and pause overlay.

mod hud;
mod plugin;

pub use hud::{EquippedLabel, HudRoot, MessageEntry, PickupPrompt};
pub use plugin::UiPlugin;
