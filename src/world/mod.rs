//! World module - the test level, its props and pickup items.

mod builder;
mod data;
mod plugin;

pub use data::{ItemDef, ItemKind, LevelDefinition, PropDef, PropKind, WallDef};
pub use plugin::{setup_level, WorldPlugin};
