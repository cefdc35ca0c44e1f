//! In-game HUD - crosshair, pickup prompt, equipped item and on-screen messages.

use bevy::prelude::*;

use crate::core::{GameState, ItemDropEvent, ItemPickupEvent, ScreenMessage};
use crate::inventory::{Inventory, InventoryItem};
use crate::player::Player;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Text shown while an item is under the crosshair.
#[derive(Component)]
pub struct PickupPrompt;

/// Name of the equipped item.
#[derive(Component)]
pub struct EquippedLabel;

/// Container for transient messages.
#[derive(Component)]
pub struct MessageLog;

/// A transient message; despawned when its timer finishes.
#[derive(Component)]
pub struct MessageEntry {
    pub timer: Timer,
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(
            Update,
            (
                update_pickup_prompt,
                update_equipped_label,
                show_screen_messages,
                expire_screen_messages,
                log_item_events,
            )
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI. Unpausing re-enters InGame, so it is only spawned once.
fn spawn_hud(mut commands: Commands, existing: Query<(), With<HudRoot>>) {
    if !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            // Crosshair dot
            parent.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
            ));

            // Pickup prompt just below the crosshair
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Percent(54.0),
                    ..default()
                },
                PickupPrompt,
            ));

            // Equipped item, bottom-left
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(20.0),
                    bottom: Val::Px(20.0),
                    ..default()
                },
                EquippedLabel,
            ));

            // Message log, top-left
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(20.0),
                    top: Val::Px(20.0),
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
                MessageLog,
            ));
        });
}

fn item_name<'a>(entity: Option<Entity>, items: &'a Query<&InventoryItem>) -> Option<&'a str> {
    entity
        .and_then(|entity| items.get(entity).ok())
        .map(|item| item.name.as_str())
}

/// Show "Pick up <name>" while the inventory sees an item.
fn update_pickup_prompt(
    player_query: Query<&Inventory, With<Player>>,
    items: Query<&InventoryItem>,
    mut prompt_query: Query<&mut Text, With<PickupPrompt>>,
) {
    let Ok(mut prompt) = prompt_query.get_single_mut() else {
        return;
    };
    let seen = player_query
        .get_single()
        .ok()
        .filter(|inventory| inventory.last_item_seen() != inventory.equipped_item())
        .and_then(|inventory| item_name(inventory.last_item_seen(), &items));

    let text = seen.map(|name| format!("Pick up {}", name)).unwrap_or_default();
    if prompt.0 != text {
        prompt.0 = text;
    }
}

fn update_equipped_label(
    player_query: Query<&Inventory, With<Player>>,
    items: Query<&InventoryItem>,
    mut label_query: Query<&mut Text, With<EquippedLabel>>,
) {
    let Ok(mut label) = label_query.get_single_mut() else {
        return;
    };
    let equipped = player_query
        .get_single()
        .ok()
        .and_then(|inventory| item_name(inventory.equipped_item(), &items));

    let text = equipped.map(str::to_string).unwrap_or_default();
    if label.0 != text {
        label.0 = text;
    }
}

/// Add incoming messages to the log.
fn show_screen_messages(
    mut commands: Commands,
    mut messages: EventReader<ScreenMessage>,
    log_query: Query<Entity, With<MessageLog>>,
) {
    for message in messages.read() {
        info!("{}", message.text);

        let Ok(log) = log_query.get_single() else {
            continue;
        };
        commands.entity(log).with_children(|parent| {
            parent.spawn((
                Text::new(message.text.clone()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(message.color),
                MessageEntry {
                    timer: Timer::from_seconds(message.duration, TimerMode::Once),
                },
            ));
        });
    }
}

fn expire_screen_messages(
    mut commands: Commands,
    time: Res<Time>,
    mut entries: Query<(Entity, &mut MessageEntry)>,
) {
    for (entity, mut entry) in entries.iter_mut() {
        if entry.timer.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

fn log_item_events(
    mut pickups: EventReader<ItemPickupEvent>,
    mut drops: EventReader<ItemDropEvent>,
    items: Query<&InventoryItem>,
) {
    for event in pickups.read() {
        let name = item_name(Some(event.item), &items).unwrap_or("item");
        debug!("{:?} picked up {} ({:?})", event.player, name, event.item);
    }
    for event in drops.read() {
        let name = item_name(Some(event.item), &items).unwrap_or("item");
        debug!("{:?} dropped {} ({:?})", event.player, name, event.item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn hud_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_event::<ScreenMessage>()
            .add_systems(Update, (show_screen_messages, expire_screen_messages).chain());
        app.world_mut().spawn((Node::default(), MessageLog));
        app
    }

    fn entry_count(app: &mut App) -> usize {
        app.world_mut()
            .query::<&MessageEntry>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn messages_appear_in_the_log() {
        let mut app = hud_app();

        app.world_mut().send_event(ScreenMessage::new("Gravity Gun here!", 2.0));
        app.update();

        let texts: Vec<String> = app
            .world_mut()
            .query_filtered::<&Text, With<MessageEntry>>()
            .iter(app.world())
            .map(|text| text.0.clone())
            .collect();
        assert_eq!(texts, vec!["Gravity Gun here!".to_string()]);
    }

    #[test]
    fn messages_expire() {
        let mut app = hud_app();

        app.world_mut().send_event(ScreenMessage::new("short", 1.0));
        app.update();
        assert_eq!(entry_count(&mut app), 1);

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(2));
        app.update();

        assert_eq!(entry_count(&mut app), 0);
    }
}
