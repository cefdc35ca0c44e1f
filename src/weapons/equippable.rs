//! The capability interface shared by every item a character can hold.

use bevy::prelude::*;

use crate::inventory::RayHit;

/// Where the holder is aiming, taken from its camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Camera entity the aim was taken from
    pub camera: Option<Entity>,
}

impl Default for Aim {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            camera: None,
        }
    }
}

impl Aim {
    pub fn from_camera(camera: Entity, transform: &GlobalTransform) -> Self {
        Self {
            origin: transform.translation(),
            direction: transform.forward().as_vec3(),
            camera: Some(camera),
        }
    }

    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Everything an item hook may touch.
pub struct ItemContext<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    /// The item's own entity
    pub item: Entity,
    /// The character holding the item
    pub holder: Entity,
    pub aim: Aim,
    /// What the holder's inventory ray currently hits
    pub target: Option<RayHit>,
}

/// An item that can be equipped, fired and dropped.
///
/// Hooks never query the world directly; they act through `ctx.commands`.
pub trait Equippable: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn fire(&mut self, ctx: &mut ItemContext);

    fn secondary_fire(&mut self, ctx: &mut ItemContext);

    /// Called once the item is attached to the holder's grip point.
    fn set_pickup_properties(&mut self, ctx: &mut ItemContext);

    /// Called after the item is detached and placed back in the world.
    fn set_drop_properties(&mut self, _ctx: &mut ItemContext) {}
}

/// Component storing an entity's equippable behaviour.
#[derive(Component)]
pub struct Equipment(pub Box<dyn Equippable>);

impl Equipment {
    pub fn new(item: impl Equippable) -> Self {
        Self(Box::new(item))
    }
}

impl std::ops::Deref for Equipment {
    type Target = dyn Equippable;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::ops::DerefMut for Equipment {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}
