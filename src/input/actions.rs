//! Turns raw Bevy input into `PlayerAction` events.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use super::bindings::{AxisAction, ButtonAction, InputBindings, InputSnapshot};

/// A semantic action for the local player character.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    Jump,
    StopJumping,
    Fire,
    SecondaryFire,
    DropItem,
    PickUpItem,
    MoveForward(f32),
    MoveRight(f32),
    /// Yaw delta in degrees
    Turn(f32),
    /// Yaw rate, scaled by the character's base turn rate
    TurnRate(f32),
    /// Pitch delta in degrees
    LookUp(f32),
    /// Pitch rate, scaled by the character's base look-up rate
    LookUpRate(f32),
}

impl PlayerAction {
    fn from_axis(axis: AxisAction, value: f32) -> Self {
        match axis {
            AxisAction::MoveForward => PlayerAction::MoveForward(value),
            AxisAction::MoveRight => PlayerAction::MoveRight(value),
            AxisAction::Turn => PlayerAction::Turn(value),
            AxisAction::TurnRate => PlayerAction::TurnRate(value),
            AxisAction::LookUp => PlayerAction::LookUp(value),
            AxisAction::LookUpRate => PlayerAction::LookUpRate(value),
        }
    }
}

/// Resolve one frame of input into actions.
///
/// Buttons fire on press. `Jump` also reports `StopJumping` on release, unless
/// it was pressed in the same frame. Every axis is reported each frame,
/// including zero values.
pub fn collect_actions(bindings: &InputBindings, input: &InputSnapshot) -> Vec<PlayerAction> {
    let mut actions = Vec::new();

    for button in ButtonAction::ALL {
        if bindings.just_pressed(button, input) {
            actions.push(match button {
                ButtonAction::Jump => PlayerAction::Jump,
                ButtonAction::Launch => PlayerAction::Fire,
                ButtonAction::Attract => PlayerAction::SecondaryFire,
                ButtonAction::DropItem => PlayerAction::DropItem,
                ButtonAction::PickUpItem => PlayerAction::PickUpItem,
            });
        }
    }

    // A tap inside one frame still jumps
    if bindings.just_released(ButtonAction::Jump, input) && !bindings.just_pressed(ButtonAction::Jump, input) {
        actions.push(PlayerAction::StopJumping);
    }

    for axis in AxisAction::ALL {
        actions.push(PlayerAction::from_axis(axis, bindings.axis_value(axis, input)));
    }

    actions
}

/// Sample keyboard, mouse and the first gamepad and emit player actions.
pub fn read_player_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    gamepads: Query<&Gamepad>,
    bindings: Res<InputBindings>,
    mut actions: EventWriter<PlayerAction>,
) {
    // Accumulate mouse movement
    let mut mouse_delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        mouse_delta += event.delta;
    }

    let input = InputSnapshot {
        keys: &keys,
        mouse_buttons: &mouse_buttons,
        mouse_delta,
        gamepad: gamepads.iter().next(),
    };

    actions.send_batch(collect_actions(&bindings, &input));
}
