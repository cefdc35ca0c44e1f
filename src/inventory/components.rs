//! Inventory component and item markers.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Default length of the aim ray, longer than any pickup reach.
const DEFAULT_SIGHT: f32 = 20.0;

/// Marks an entity that can be picked up into an inventory.
#[derive(Component, Debug, Clone)]
pub struct InventoryItem {
    pub name: String,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Result of the most recent inventory raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub distance: f32,
    /// The hit belongs to a dynamic rigid body
    pub dynamic: bool,
}

/// Tracks what a character is looking at and what it holds.
///
/// Holds at most one equipped item. The raycast runs every frame from the
/// camera set with [`Inventory::set_camera`].
#[derive(Component, Debug, Clone)]
pub struct Inventory {
    /// Maximum pickup distance in metres
    pub reach: f32,
    /// Length of the aim ray. Hits past `reach` are recorded but never seen as items.
    pub sight: f32,
    camera: Option<Entity>,
    equipped: Option<Entity>,
    last_item_seen: Option<Entity>,
    last_hit: Option<RayHit>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl Inventory {
    pub fn new(reach: f32) -> Self {
        Self {
            reach,
            sight: reach.max(DEFAULT_SIGHT),
            camera: None,
            equipped: None,
            last_item_seen: None,
            last_hit: None,
        }
    }

    pub fn set_camera(&mut self, camera: Entity) {
        self.camera = Some(camera);
    }

    pub fn camera(&self) -> Option<Entity> {
        self.camera
    }

    pub fn equipped_item(&self) -> Option<Entity> {
        self.equipped
    }

    pub fn last_item_seen(&self) -> Option<Entity> {
        self.last_item_seen
    }

    pub fn last_hit(&self) -> Option<RayHit> {
        self.last_hit
    }

    /// Cast the pickup ray from `camera` and record what it hit.
    ///
    /// `ignore` is excluded from the query so the ray never stops on the
    /// character's own capsule.
    pub fn raycast(
        &mut self,
        ignore: Entity,
        context: &RapierContext,
        camera: &GlobalTransform,
        is_item: impl Fn(Entity) -> bool,
        is_dynamic: impl Fn(Entity) -> bool,
    ) {
        let origin = camera.translation();
        let direction = camera.forward().as_vec3();

        let filter = QueryFilter::default()
            .exclude_collider(ignore)
            .exclude_rigid_body(ignore)
            .exclude_sensors();

        let hit = context
            .cast_ray(origin, direction, self.sight, true, filter)
            .map(|(entity, distance)| RayHit {
                entity,
                point: origin + direction * distance,
                distance,
                dynamic: is_dynamic(entity),
            });

        self.observe(hit, is_item);
    }

    /// Record a ray hit. `last_item_seen` follows the hit only when it is an item.
    pub fn observe(&mut self, hit: Option<RayHit>, is_item: impl Fn(Entity) -> bool) {
        self.last_hit = hit;
        self.last_item_seen = hit
            .filter(|hit| hit.distance <= self.reach)
            .map(|hit| hit.entity)
            .filter(|&entity| is_item(entity));
    }

    /// Equip the last-seen item.
    ///
    /// Returns the previously equipped item when a different one displaces it,
    /// so the caller can put it back into the world.
    pub fn pickup_item(&mut self) -> Option<Entity> {
        let item = self.last_item_seen?;
        if self.equipped == Some(item) {
            return None;
        }
        self.equipped.replace(item)
    }

    /// Unequip and return the equipped item, if any.
    pub fn drop_equipped_item(&mut self) -> Option<Entity> {
        let item = self.equipped.take()?;
        if self.last_item_seen == Some(item) {
            self.last_item_seen = None;
        }
        Some(item)
    }

    /// Forget entities that no longer exist.
    pub fn forget(&mut self, entity: Entity) {
        if self.equipped == Some(entity) {
            self.equipped = None;
        }
        if self.last_item_seen == Some(entity) {
            self.last_item_seen = None;
        }
        if self.last_hit.is_some_and(|hit| hit.entity == entity) {
            self.last_hit = None;
        }
    }
}
