//! Player character actions: movement input, pickup, drop and fire.
//!
//! Each system reads `PlayerAction` events and forwards them to the
//! character's inventory and equipped item. A missing inventory, item or
//! animation player turns the action into a no-op.

use bevy::animation::RepeatAnimation;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::core::{ItemDropEvent, ItemPickupEvent, ScreenMessage};
use crate::input::PlayerAction;
use crate::inventory::{Inventory, InventoryItem, RayHit};
use crate::weapons::{Aim, Equipment, ItemContext, ReturnToWorldLayer};

/// Depth-first search below `root` for the first entity matching `predicate`.
pub fn find_descendant(
    root: Entity,
    children_query: &Query<&Children>,
    predicate: impl Fn(Entity) -> bool,
) -> Option<Entity> {
    let mut to_visit = vec![root];
    while let Some(entity) = to_visit.pop() {
        if entity != root && predicate(entity) {
            return Some(entity);
        }
        if let Ok(children) = children_query.get(entity) {
            to_visit.extend(children.iter().rev());
        }
    }
    None
}

/// The grip socket below the body mesh, or the body itself when it has none.
fn grip_point(body: Entity, children_query: &Query<&Children>, names: &Query<&Name>) -> Entity {
    find_descendant(body, children_query, |entity| {
        names.get(entity).is_ok_and(|name| name.as_str() == GRIP_POINT)
    })
    .unwrap_or(body)
}

fn aim_from(camera: Entity, transforms: &Query<&GlobalTransform>) -> Aim {
    transforms
        .get(camera)
        .map(|transform| Aim::from_camera(camera, transform))
        .unwrap_or_default()
}

fn set_body_hidden(character: &mut PlayerCharacter, hidden: bool, visibility_query: &mut Query<&mut Visibility>) {
    character.is_hidden_mesh = hidden;
    if let Ok(mut visibility) = visibility_query.get_mut(character.body) {
        *visibility = if hidden { Visibility::Hidden } else { Visibility::Inherited };
    }
}

/// Detach an item from the character and put it back in the world in front of the camera.
fn release_item(
    commands: &mut Commands,
    equipment_query: &mut Query<&mut Equipment>,
    item: Entity,
    holder: Entity,
    aim: Aim,
    target: Option<RayHit>,
    drop_distance: f32,
) {
    let Some(mut entity) = commands.get_entity(item) else {
        return;
    };
    entity.remove_parent().insert((
        Transform::from_translation(aim.point_at(drop_distance)),
        Visibility::Inherited,
        ReturnToWorldLayer,
    ));

    if let Ok(mut equipment) = equipment_query.get_mut(item) {
        let mut ctx = ItemContext {
            commands,
            item,
            holder,
            aim,
            target,
        };
        equipment.set_drop_properties(&mut ctx);
    }
}

/// Movement, look and jump actions.
///
/// Rate-based look input is scaled by the base rate and this frame's delta;
/// absolute look input is applied as is.
pub fn handle_movement_actions(
    mut actions: EventReader<PlayerAction>,
    time: Res<Time>,
    mut player_query: Query<(&PlayerCharacter, &Transform, &mut ControlInput, &mut MovementState), With<Player>>,
) {
    let Ok((character, transform, mut control, mut movement)) = player_query.get_single_mut() else {
        return;
    };
    let delta = time.delta_secs();

    for action in actions.read() {
        match *action {
            PlayerAction::MoveForward(amount) => {
                if amount != 0.0 {
                    control.add_movement_input(transform.forward().as_vec3(), amount);
                }
            }
            PlayerAction::MoveRight(amount) => {
                if amount != 0.0 {
                    control.add_movement_input(transform.right().as_vec3(), amount);
                }
            }
            PlayerAction::Turn(degrees) => control.add_yaw_input(degrees),
            PlayerAction::TurnRate(rate) => control.add_yaw_input(rate * character.base_turn_rate * delta),
            PlayerAction::LookUp(degrees) => control.add_pitch_input(degrees),
            PlayerAction::LookUpRate(rate) => {
                control.add_pitch_input(rate * character.base_look_up_rate * delta)
            }
            PlayerAction::Jump => movement.jump_requested = true,
            PlayerAction::StopJumping => movement.jump_requested = false,
            _ => {}
        }
    }
}

/// Pick up the item under the crosshair and attach it to the grip point.
#[allow(clippy::too_many_arguments)]
pub fn pick_up_item(
    mut commands: Commands,
    mut actions: EventReader<PlayerAction>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(Entity, &mut PlayerCharacter, Option<&mut Inventory>), With<Player>>,
    mut visibility_query: Query<&mut Visibility>,
    mut equipment_query: Query<&mut Equipment>,
    transforms: Query<&GlobalTransform>,
    children_query: Query<&Children>,
    names: Query<&Name>,
    mut pickup_events: EventWriter<ItemPickupEvent>,
    mut messages: EventWriter<ScreenMessage>,
) {
    let presses = actions.read().filter(|a| **a == PlayerAction::PickUpItem).count();
    if presses == 0 {
        return;
    }
    let Ok((player, mut character, inventory)) = player_query.get_single_mut() else {
        return;
    };
    let Some(mut inventory) = inventory else {
        return;
    };

    for _ in 0..presses {
        let aim = aim_from(character.camera, &transforms);
        let target = inventory.last_hit();
        let previous = inventory.equipped_item();

        if let Some(displaced) = inventory.pickup_item() {
            release_item(
                &mut commands,
                &mut equipment_query,
                displaced,
                player,
                aim,
                target,
                config.drop_distance,
            );
        }

        // Nothing seen, or the seen item is already in hand
        let Some(item) = inventory.equipped_item() else {
            continue;
        };
        if inventory.last_item_seen().is_none() || previous == Some(item) {
            continue;
        }
        let Some(mut entity) = commands.get_entity(item) else {
            continue;
        };

        // Snap to the grip point; the item's own hook may then adjust its offset
        let grip = grip_point(character.body, &children_query, &names);
        entity.set_parent(grip).insert(Transform::IDENTITY);

        if let Ok(mut equipment) = equipment_query.get_mut(item) {
            let mut ctx = ItemContext {
                commands: &mut commands,
                item,
                holder: player,
                aim,
                target,
            };
            equipment.set_pickup_properties(&mut ctx);
            messages.send(ScreenMessage::new(format!("{} here!", equipment.name()), 2.0));
        }

        set_body_hidden(&mut character, false, &mut visibility_query);
        pickup_events.send(ItemPickupEvent { item, player });
    }
}

/// Drop the equipped item. The body mesh is hidden whether or not anything was dropped.
pub fn drop_item(
    mut commands: Commands,
    mut actions: EventReader<PlayerAction>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(Entity, &mut PlayerCharacter, Option<&mut Inventory>), With<Player>>,
    mut visibility_query: Query<&mut Visibility>,
    mut equipment_query: Query<&mut Equipment>,
    transforms: Query<&GlobalTransform>,
    mut drop_events: EventWriter<ItemDropEvent>,
) {
    let presses = actions.read().filter(|a| **a == PlayerAction::DropItem).count();
    if presses == 0 {
        return;
    }
    let Ok((player, mut character, mut inventory)) = player_query.get_single_mut() else {
        return;
    };

    for _ in 0..presses {
        if let Some(inventory) = inventory.as_deref_mut() {
            let target = inventory.last_hit();
            if let Some(item) = inventory.drop_equipped_item() {
                let aim = aim_from(character.camera, &transforms);
                release_item(
                    &mut commands,
                    &mut equipment_query,
                    item,
                    player,
                    aim,
                    target,
                    config.drop_distance,
                );
                drop_events.send(ItemDropEvent { item, player });
            }
        }

        set_body_hidden(&mut character, true, &mut visibility_query);
    }
}

/// Forward fire and secondary fire to the equipped item.
///
/// Fire also plays the body's fire animation when one is set up.
pub fn fire_equipped_item(
    mut commands: Commands,
    mut actions: EventReader<PlayerAction>,
    player_query: Query<(Entity, &PlayerCharacter, Option<&Inventory>), With<Player>>,
    mut equipment_query: Query<&mut Equipment>,
    transforms: Query<&GlobalTransform>,
    mut animation_players: Query<&mut AnimationPlayer>,
) {
    let Ok((player, character, Some(inventory))) = player_query.get_single() else {
        actions.clear();
        return;
    };

    for action in actions.read() {
        let primary = match action {
            PlayerAction::Fire => true,
            PlayerAction::SecondaryFire => false,
            _ => continue,
        };

        let Some(item) = inventory.equipped_item() else {
            continue;
        };
        let Ok(mut equipment) = equipment_query.get_mut(item) else {
            continue;
        };

        let mut ctx = ItemContext {
            commands: &mut commands,
            item,
            holder: player,
            aim: aim_from(character.camera, &transforms),
            target: inventory.last_hit(),
        };

        if !primary {
            equipment.secondary_fire(&mut ctx);
            continue;
        }

        equipment.fire(&mut ctx);

        // Try and play a firing animation if specified
        let (Some(node), Some(animator)) = (character.fire_animation, character.animator) else {
            continue;
        };
        if let Ok(mut animation_player) = animation_players.get_mut(animator) {
            let animation = animation_player.start(node);
            animation.replay();
            animation.set_repeat(RepeatAnimation::Never).set_speed(1.0);
        }
    }
}

/// Per-frame tick: run the inventory's pickup raycast from the character's camera.
pub fn character_tick(
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<(Entity, Option<&mut Inventory>), With<Player>>,
    transforms: Query<&GlobalTransform>,
    items: Query<(), With<InventoryItem>>,
    bodies: Query<&RigidBody>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (player, inventory) in player_query.iter_mut() {
        let Some(mut inventory) = inventory else {
            continue;
        };
        let Some(camera) = inventory.camera() else {
            continue;
        };
        let Ok(camera_transform) = transforms.get(camera) else {
            continue;
        };

        inventory.raycast(
            player,
            context,
            camera_transform,
            |entity| items.contains(entity),
            |entity| matches!(bodies.get(entity), Ok(RigidBody::Dynamic)),
        );
    }
}

/// Overlap hook. Overlap-triggered pickup is not used; pickup is always explicit.
pub fn on_overlap_begin(
    mut collision_events: EventReader<CollisionEvent>,
    player_query: Query<Entity, With<Player>>,
) {
    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };
        for player in player_query.iter() {
            let other = if a == player {
                b
            } else if b == player {
                a
            } else {
                continue;
            };
            trace!("Player {:?} began overlapping {:?}", player, other);
        }
    }
}

/// Find the body's AnimationPlayer once its scene has loaded and attach the fire clip.
pub fn setup_body_animation(
    mut commands: Commands,
    config: Res<PlayerConfig>,
    asset_server: Res<AssetServer>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut player_query: Query<(Entity, &mut PlayerCharacter), With<NeedsBodyAnimationSetup>>,
    children_query: Query<&Children>,
    animation_players: Query<(), With<AnimationPlayer>>,
) {
    for (player, mut character) in player_query.iter_mut() {
        let (Some(model), Some(clip_index)) = (&config.body_model, config.fire_animation) else {
            // No animation configured, just remove the marker
            commands.entity(player).remove::<NeedsBodyAnimationSetup>();
            continue;
        };

        // The scene may not have spawned yet
        let Some(animator) = find_descendant(character.body, &children_query, |entity| {
            animation_players.contains(entity)
        }) else {
            continue;
        };

        let clip: Handle<AnimationClip> = asset_server.load(format!("{}#Animation{}", model, clip_index));
        let mut graph = AnimationGraph::new();
        let node = graph.add_clip(clip, 1.0, graph.root);

        commands.entity(animator).insert(AnimationGraphHandle(graphs.add(graph)));
        commands.entity(player).remove::<NeedsBodyAnimationSetup>();

        character.fire_animation = Some(node);
        character.animator = Some(animator);
        info!("Fire animation ready on {:?}", animator);
    }
}
