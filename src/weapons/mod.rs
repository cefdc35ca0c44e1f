//! Weapons module - equippable items, the gravity gun, and viewmodel layers.

mod equippable;
mod gravity_gun;
mod plugin;
mod viewmodel;

pub use equippable::{Aim, Equipment, Equippable, ItemContext};
pub use gravity_gun::{GravityGun, GravityGunConfig, HeldObject};
pub use plugin::WeaponsPlugin;
pub use viewmodel::{ReturnToWorldLayer, VIEWMODEL_LAYER, WORLD_LAYER};
