//! Global events used for cross-system communication.
//!
//! The player systems never talk to the HUD directly. They send events and
//! whatever is listening (HUD, logging) reacts to them.

use bevy::prelude::*;

/// Sent when the player picks up an item.
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemPickupEvent {
    /// The item entity being picked up
    pub item: Entity,
    /// The player entity
    pub player: Entity,
}

/// Sent when the player drops an item.
#[derive(Event, Debug, Clone, Copy)]
pub struct ItemDropEvent {
    pub item: Entity,
    pub player: Entity,
}

/// A short-lived message shown on screen.
#[derive(Event, Debug, Clone)]
pub struct ScreenMessage {
    pub text: String,
    /// Seconds the message stays visible
    pub duration: f32,
    pub color: Color,
}

impl ScreenMessage {
    pub fn new(text: impl Into<String>, duration: f32) -> Self {
        Self {
            text: text.into(),
            duration,
            color: Color::srgb(1.0, 0.9, 0.2),
        }
    }
}
