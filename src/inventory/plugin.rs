//! Inventory plugin.

use bevy::prelude::*;

use super::systems::forget_despawned_items;
use crate::player::PlayerSet;

/// Inventory plugin - keeps inventories free of dangling entity references.
///
/// The pickup raycast itself is driven by the character's tick.
pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, forget_despawned_items.before(PlayerSet::Actions));
    }
}
