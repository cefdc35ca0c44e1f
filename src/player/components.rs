//! Player-related components.

use bevy::animation::graph::AnimationNodeIndex;
use bevy::prelude::*;
use serde::Deserialize;

use crate::core::load_or_default;

const PLAYER_CONFIG_PATH: &str = "assets/data/player.ron";

/// Name of the socket on the body mesh that held items snap to.
pub const GRIP_POINT: &str = "GripPoint";

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// The first-person character: turn rates, body mesh state and the entities
/// it drives.
#[derive(Component, Debug, Clone)]
pub struct PlayerCharacter {
    /// Degrees per second at full rate input
    pub base_turn_rate: f32,
    /// Degrees per second at full rate input
    pub base_look_up_rate: f32,
    /// True iff the body mesh is hidden
    pub is_hidden_mesh: bool,
    pub camera: Entity,
    pub body: Entity,
    /// Animation graph node played on fire
    pub fire_animation: Option<AnimationNodeIndex>,
    /// Entity carrying the body's AnimationPlayer
    pub animator: Option<Entity>,
}

impl PlayerCharacter {
    /// A character whose body mesh starts hidden.
    pub fn new(config: &PlayerConfig, camera: Entity, body: Entity) -> Self {
        Self {
            base_turn_rate: config.base_turn_rate,
            base_look_up_rate: config.base_look_up_rate,
            is_hidden_mesh: true,
            camera,
            body,
            fire_animation: None,
            animator: None,
        }
    }
}

/// Movement and rotation requested this frame, consumed by the movement systems.
#[derive(Component, Debug, Default, Clone)]
pub struct ControlInput {
    movement: Vec<Vec3>,
    /// Degrees, positive turns right
    yaw: f32,
    /// Degrees, positive looks up
    pitch: f32,
}

impl ControlInput {
    pub fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.movement.push(direction * scale);
    }

    pub fn add_yaw_input(&mut self, degrees: f32) {
        self.yaw += degrees;
    }

    pub fn add_pitch_input(&mut self, degrees: f32) {
        self.pitch += degrees;
    }

    pub fn pending_movement(&self) -> &[Vec3] {
        &self.movement
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Sum of this frame's movement input, capped to unit length.
    pub fn consume_movement(&mut self) -> Vec3 {
        let total: Vec3 = self.movement.drain(..).sum();
        total.clamp_length_max(1.0)
    }

    /// Yaw and pitch accumulated this frame, in degrees.
    pub fn consume_rotation(&mut self) -> (f32, f32) {
        let rotation = (self.yaw, self.pitch);
        self.yaw = 0.0;
        self.pitch = 0.0;
        rotation
    }
}

/// Tracks player movement state for physics.
#[derive(Component, Default)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
    pub jump_requested: bool,
}

/// Marker for the first-person body mesh (arms) parented to the camera.
#[derive(Component)]
pub struct BodyMesh;

/// Marker for players whose body AnimationPlayer hasn't been found yet.
#[derive(Component)]
pub struct NeedsBodyAnimationSetup;

/// Configuration for the first-person character.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    /// Yaw rate for rate-based devices, degrees per second
    pub base_turn_rate: f32,
    /// Pitch rate for rate-based devices, degrees per second
    pub base_look_up_rate: f32,
    /// Pitch limit in degrees either side of the horizon
    pub max_pitch: f32,
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Jump velocity
    pub jump_force: f32,
    /// Gravity acceleration
    pub gravity: f32,
    pub capsule_half_height: f32,
    pub capsule_radius: f32,
    /// Camera height above the capsule centre
    pub eye_height: f32,
    /// Inventory raycast length
    pub pickup_reach: f32,
    /// How far in front of the camera dropped items are placed
    pub drop_distance: f32,
    /// Body mesh offset from the camera
    pub body_offset: (f32, f32, f32),
    /// Grip socket offset from the body mesh, used when the model has none
    pub grip_offset: (f32, f32, f32),
    /// glTF file for the body mesh, without the `#Scene0` label
    #[serde(default)]
    pub body_model: Option<String>,
    /// Animation index inside `body_model` played on fire
    #[serde(default)]
    pub fire_animation: Option<usize>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_turn_rate: 45.0,
            base_look_up_rate: 45.0,
            max_pitch: 80.0,
            move_speed: 6.0,
            jump_force: 5.0,
            gravity: 15.0,
            capsule_half_height: 0.6,
            capsule_radius: 0.35,
            eye_height: 0.64,
            pickup_reach: 3.0,
            drop_distance: 1.2,
            body_offset: (0.25, -0.3, -0.45),
            grip_offset: (0.0, 0.05, -0.2),
            body_model: None,
            fire_animation: None,
        }
    }
}

impl PlayerConfig {
    pub fn load() -> Self {
        load_or_default(PLAYER_CONFIG_PATH)
    }
}

/// System to load the player config at startup.
pub fn load_player_config(mut commands: Commands) {
    commands.insert_resource(PlayerConfig::load());
}
