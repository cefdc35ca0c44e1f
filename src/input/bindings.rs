//! Named input bindings loaded from `assets/data/input.ron`.
//!
//! Buttons map to named actions, and keys, mouse motion and gamepad sticks
//! map to named axes with a per-binding scale. Several bindings may feed the
//! same action or axis; axis values are summed.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

use crate::core::load_or_default;

const INPUT_BINDINGS_PATH: &str = "assets/data/input.ron";

/// Button-style actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ButtonAction {
    Jump,
    /// Primary fire
    Launch,
    /// Secondary fire
    Attract,
    DropItem,
    PickUpItem,
}

impl ButtonAction {
    pub const ALL: [ButtonAction; 5] = [
        ButtonAction::Jump,
        ButtonAction::Launch,
        ButtonAction::Attract,
        ButtonAction::DropItem,
        ButtonAction::PickUpItem,
    ];
}

/// Continuous axes, sampled every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum AxisAction {
    MoveForward,
    MoveRight,
    /// Absolute yaw delta (mouse)
    Turn,
    /// Yaw rate (stick)
    TurnRate,
    /// Absolute pitch delta (mouse)
    LookUp,
    /// Pitch rate (stick)
    LookUpRate,
}

impl AxisAction {
    pub const ALL: [AxisAction; 6] = [
        AxisAction::MoveForward,
        AxisAction::MoveRight,
        AxisAction::Turn,
        AxisAction::TurnRate,
        AxisAction::LookUp,
        AxisAction::LookUpRate,
    ];
}

/// A physical button.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum ButtonSource {
    Key(KeyCode),
    Mouse(MouseButton),
    Gamepad(GamepadButton),
}

/// A physical axis. Keys read as 1.0 while held.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum AxisSource {
    Key(KeyCode),
    MouseX,
    MouseY,
    Gamepad(GamepadAxis),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AxisBinding {
    pub source: AxisSource,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl AxisBinding {
    pub fn new(source: AxisSource, scale: f32) -> Self {
        Self { source, scale }
    }
}

/// Everything the bindings need to read for one frame.
pub struct InputSnapshot<'a> {
    pub keys: &'a ButtonInput<KeyCode>,
    pub mouse_buttons: &'a ButtonInput<MouseButton>,
    /// Mouse motion accumulated this frame, in pixels
    pub mouse_delta: Vec2,
    pub gamepad: Option<&'a Gamepad>,
}

impl ButtonSource {
    fn just_pressed(&self, input: &InputSnapshot) -> bool {
        match *self {
            ButtonSource::Key(key) => input.keys.just_pressed(key),
            ButtonSource::Mouse(button) => input.mouse_buttons.just_pressed(button),
            ButtonSource::Gamepad(button) => input.gamepad.is_some_and(|pad| pad.just_pressed(button)),
        }
    }

    fn just_released(&self, input: &InputSnapshot) -> bool {
        match *self {
            ButtonSource::Key(key) => input.keys.just_released(key),
            ButtonSource::Mouse(button) => input.mouse_buttons.just_released(button),
            ButtonSource::Gamepad(button) => input.gamepad.is_some_and(|pad| pad.just_released(button)),
        }
    }
}

impl AxisSource {
    fn raw_value(&self, input: &InputSnapshot) -> f32 {
        match *self {
            AxisSource::Key(key) => {
                if input.keys.pressed(key) {
                    1.0
                } else {
                    0.0
                }
            }
            AxisSource::MouseX => input.mouse_delta.x,
            AxisSource::MouseY => input.mouse_delta.y,
            AxisSource::Gamepad(axis) => input
                .gamepad
                .and_then(|pad| pad.get(axis))
                .unwrap_or(0.0),
        }
    }
}

/// Action and axis bindings resource.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct InputBindings {
    pub actions: HashMap<ButtonAction, Vec<ButtonSource>>,
    pub axes: HashMap<AxisAction, Vec<AxisBinding>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        use AxisSource::{Gamepad as Pad, Key, MouseX, MouseY};

        let actions = HashMap::from([
            (
                ButtonAction::Jump,
                vec![ButtonSource::Key(KeyCode::Space), ButtonSource::Gamepad(GamepadButton::South)],
            ),
            (
                ButtonAction::Launch,
                vec![ButtonSource::Mouse(MouseButton::Left), ButtonSource::Gamepad(GamepadButton::RightTrigger2)],
            ),
            (
                ButtonAction::Attract,
                vec![ButtonSource::Mouse(MouseButton::Right), ButtonSource::Gamepad(GamepadButton::LeftTrigger2)],
            ),
            (
                ButtonAction::DropItem,
                vec![ButtonSource::Key(KeyCode::KeyQ), ButtonSource::Gamepad(GamepadButton::East)],
            ),
            (
                ButtonAction::PickUpItem,
                vec![ButtonSource::Key(KeyCode::KeyE), ButtonSource::Gamepad(GamepadButton::West)],
            ),
        ]);

        let axes = HashMap::from([
            (
                AxisAction::MoveForward,
                vec![
                    AxisBinding::new(Key(KeyCode::KeyW), 1.0),
                    AxisBinding::new(Key(KeyCode::KeyS), -1.0),
                    AxisBinding::new(Pad(GamepadAxis::LeftStickY), 1.0),
                ],
            ),
            (
                AxisAction::MoveRight,
                vec![
                    AxisBinding::new(Key(KeyCode::KeyD), 1.0),
                    AxisBinding::new(Key(KeyCode::KeyA), -1.0),
                    AxisBinding::new(Pad(GamepadAxis::LeftStickX), 1.0),
                ],
            ),
            // Mouse deltas are pixels, scaled to degrees
            (AxisAction::Turn, vec![AxisBinding::new(MouseX, 0.08)]),
            (AxisAction::LookUp, vec![AxisBinding::new(MouseY, -0.08)]),
            (AxisAction::TurnRate, vec![AxisBinding::new(Pad(GamepadAxis::RightStickX), 1.0)]),
            (AxisAction::LookUpRate, vec![AxisBinding::new(Pad(GamepadAxis::RightStickY), 1.0)]),
        ]);

        Self { actions, axes }
    }
}

impl InputBindings {
    /// Load bindings from the data file, falling back to the default layout.
    pub fn load() -> Self {
        load_or_default(INPUT_BINDINGS_PATH)
    }

    pub fn just_pressed(&self, action: ButtonAction, input: &InputSnapshot) -> bool {
        self.actions
            .get(&action)
            .is_some_and(|sources| sources.iter().any(|s| s.just_pressed(input)))
    }

    pub fn just_released(&self, action: ButtonAction, input: &InputSnapshot) -> bool {
        self.actions
            .get(&action)
            .is_some_and(|sources| sources.iter().any(|s| s.just_released(input)))
    }

    /// Sum of every binding feeding `axis`, each multiplied by its scale.
    pub fn axis_value(&self, axis: AxisAction, input: &InputSnapshot) -> f32 {
        self.axes.get(&axis).map_or(0.0, |bindings| {
            bindings
                .iter()
                .map(|binding| binding.source.raw_value(input) * binding.scale)
                .sum()
        })
    }
}

/// System to load input bindings at startup.
pub fn load_input_bindings(mut commands: Commands) {
    commands.insert_resource(InputBindings::load());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;

    fn snapshot<'a>(
        keys: &'a ButtonInput<KeyCode>,
        mouse_buttons: &'a ButtonInput<MouseButton>,
        mouse_delta: Vec2,
    ) -> InputSnapshot<'a> {
        InputSnapshot {
            keys,
            mouse_buttons,
            mouse_delta,
            gamepad: None,
        }
    }

    #[test]
    fn opposing_keys_cancel_out() {
        let bindings = InputBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        let mouse = ButtonInput::<MouseButton>::default();

        keys.press(KeyCode::KeyW);
        let input = snapshot(&keys, &mouse, Vec2::ZERO);
        assert_eq!(bindings.axis_value(AxisAction::MoveForward, &input), 1.0);

        keys.press(KeyCode::KeyS);
        let input = snapshot(&keys, &mouse, Vec2::ZERO);
        assert_eq!(bindings.axis_value(AxisAction::MoveForward, &input), 0.0);
    }

    #[test]
    fn mouse_motion_is_scaled() {
        let bindings = InputBindings::default();
        let keys = ButtonInput::<KeyCode>::default();
        let mouse = ButtonInput::<MouseButton>::default();
        let input = snapshot(&keys, &mouse, Vec2::new(10.0, 5.0));

        assert!((bindings.axis_value(AxisAction::Turn, &input) - 0.8).abs() < 1e-6);
        assert!((bindings.axis_value(AxisAction::LookUp, &input) + 0.4).abs() < 1e-6);
    }

    #[test]
    fn unbound_axis_reads_zero() {
        let bindings = InputBindings {
            actions: HashMap::new(),
            axes: HashMap::new(),
        };
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        let mouse = ButtonInput::<MouseButton>::default();
        let input = snapshot(&keys, &mouse, Vec2::ONE);

        assert_eq!(bindings.axis_value(AxisAction::MoveForward, &input), 0.0);
        assert!(!bindings.just_pressed(ButtonAction::Jump, &input));
    }

    #[test]
    fn mouse_button_triggers_action() {
        let bindings = InputBindings::default();
        let keys = ButtonInput::<KeyCode>::default();
        let mut mouse = ButtonInput::<MouseButton>::default();
        mouse.press(MouseButton::Right);
        let input = snapshot(&keys, &mouse, Vec2::ZERO);

        assert!(bindings.just_pressed(ButtonAction::Attract, &input));
        assert!(!bindings.just_pressed(ButtonAction::Launch, &input));
    }

    #[test]
    fn bindings_parse_from_ron() {
        let text = r#"(
            actions: {
                PickUpItem: [Key(KeyF)],
            },
            axes: {
                MoveForward: [(source: Key(ArrowUp)), (source: Key(ArrowDown), scale: -1.0)],
            },
        )"#;
        let bindings: InputBindings = parse_ron("inline", text).unwrap();

        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ArrowDown);
        keys.press(KeyCode::KeyF);
        let mouse = ButtonInput::<MouseButton>::default();
        let input = snapshot(&keys, &mouse, Vec2::ZERO);

        assert_eq!(bindings.axis_value(AxisAction::MoveForward, &input), -1.0);
        assert!(bindings.just_pressed(ButtonAction::PickUpItem, &input));
    }

    #[test]
    fn shipped_bindings_cover_every_action() {
        let bindings: InputBindings =
            parse_ron(INPUT_BINDINGS_PATH, include_str!("../../assets/data/input.ron")).unwrap();

        for action in ButtonAction::ALL {
            assert!(bindings.actions.contains_key(&action), "{:?} unbound", action);
        }
        for axis in AxisAction::ALL {
            assert!(bindings.axes.contains_key(&axis), "{:?} unbound", axis);
        }
    }
}
