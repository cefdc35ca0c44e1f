//! Inventory housekeeping.

use bevy::prelude::*;

use super::components::Inventory;

/// Drop references to entities that were despawned since the last frame.
pub fn forget_despawned_items(mut inventories: Query<&mut Inventory>, entities: Query<Entity>) {
    for mut inventory in inventories.iter_mut() {
        let tracked = [
            inventory.equipped_item(),
            inventory.last_item_seen(),
            inventory.last_hit().map(|hit| hit.entity),
        ];

        for entity in tracked.into_iter().flatten() {
            if entities.get(entity).is_err() {
                debug!("Inventory forgetting despawned entity {:?}", entity);
                inventory.forget(entity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::RayHit;

    #[test]
    fn despawned_equipped_item_is_forgotten() {
        let mut app = App::new();
        app.add_systems(Update, forget_despawned_items);

        let item = app.world_mut().spawn_empty().id();
        let mut inventory = Inventory::default();
        inventory.observe(
            Some(RayHit {
                entity: item,
                point: Vec3::ZERO,
                distance: 1.0,
                dynamic: true,
            }),
            |_| true,
        );
        inventory.pickup_item();
        let player = app.world_mut().spawn(inventory).id();

        app.world_mut().despawn(item);
        app.update();

        let inventory = app.world().get::<Inventory>(player).unwrap();
        assert_eq!(inventory.equipped_item(), None);
        assert_eq!(inventory.last_item_seen(), None);
    }
}
