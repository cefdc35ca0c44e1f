//! Inventory module - pickup raycast and equipped item tracking.

mod components;
mod plugin;
mod systems;

pub use components::{Inventory, InventoryItem, RayHit};
pub use plugin::InventoryPlugin;
