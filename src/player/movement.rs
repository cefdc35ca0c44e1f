//! First-person movement, camera control and player spawning.

use bevy::core_pipeline::core_3d::Camera3dDepthLoadOp;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::render::view::RenderLayers;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::inventory::Inventory;
use crate::weapons::{VIEWMODEL_LAYER, WORLD_LAYER};

/// The player's camera.
#[derive(Component)]
pub struct PlayerCamera {
    /// Current pitch angle in radians (looking up/down)
    pub pitch: f32,
}

impl Default for PlayerCamera {
    fn default() -> Self {
        Self { pitch: 0.0 }
    }
}

/// Marker for the viewmodel camera (renders the body mesh on a separate layer).
#[derive(Component)]
pub struct ViewmodelCamera;

/// Grab and hide cursor when entering gameplay.
pub fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving gameplay.
pub fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Apply this frame's yaw and pitch input.
///
/// Yaw rotates the player entity; pitch rotates the camera, which is a child
/// of the player, clamped to `max_pitch`.
pub fn apply_look_input(
    config: Res<PlayerConfig>,
    mut player_query: Query<(&PlayerCharacter, &mut Transform, &mut ControlInput), With<Player>>,
    mut camera_query: Query<(&mut Transform, &mut PlayerCamera), Without<Player>>,
) {
    let Ok((character, mut player_transform, mut control)) = player_query.get_single_mut() else {
        return;
    };
    let (yaw, pitch) = control.consume_rotation();
    if yaw == 0.0 && pitch == 0.0 {
        return;
    }

    // Positive yaw turns right, which is clockwise seen from above
    player_transform.rotate_y(-yaw.to_radians());

    let Ok((mut camera_transform, mut camera)) = camera_query.get_mut(character.camera) else {
        return;
    };
    let limit = config.max_pitch.to_radians();
    camera.pitch = (camera.pitch + pitch.to_radians()).clamp(-limit, limit);
    camera_transform.rotation = Quat::from_rotation_x(camera.pitch);
}

/// Apply this frame's movement input, jumping and gravity.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn apply_movement_input(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<(
        Entity,
        &Transform,
        &mut ControlInput,
        &mut MovementState,
        &mut KinematicCharacterController,
    ), With<Player>>,
) {
    let Ok((player_entity, transform, mut control, mut movement_state, mut controller)) =
        player_query.get_single_mut()
    else {
        return;
    };
    let delta = time.delta_secs();

    // Ground check using a short raycast below the capsule
    let capsule_bottom = config.capsule_half_height + config.capsule_radius;
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation - Vec3::Y * (capsule_bottom - 0.05);
        context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                0.15,
                true,
                QueryFilter::default().exclude_collider(player_entity).exclude_sensors(),
            )
            .is_some()
    } else {
        // Fallback: assume grounded if no physics context
        true
    };
    movement_state.is_grounded = is_grounded;

    if is_grounded {
        // Only reset velocity if we're actually falling/landed
        if movement_state.vertical_velocity < 0.0 {
            movement_state.vertical_velocity = 0.0;
        }
        if movement_state.jump_requested {
            movement_state.vertical_velocity = config.jump_force;
            movement_state.jump_requested = false;
        }
    } else {
        movement_state.vertical_velocity -= config.gravity * delta;
    }

    let horizontal = control.consume_movement() * config.move_speed * delta;
    let vertical = Vec3::new(0.0, movement_state.vertical_velocity * delta, 0.0);

    controller.translation = Some(horizontal + vertical);
}

/// Spawn the player entity with its cameras and body mesh.
///
/// The body mesh starts hidden; it is shown once an item is picked up.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
    position: Vec3,
    config: &PlayerConfig,
) -> Entity {
    // Spawn player body
    let player = commands
        .spawn((
            Player,
            ControlInput::default(),
            MovementState::default(),
            Name::new("Player"),
            // Transform
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(config.capsule_half_height, config.capsule_radius),
            ActiveEvents::COLLISION_EVENTS,
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(CharacterAutostep {
                    max_height: CharacterLength::Absolute(0.35),
                    min_width: CharacterLength::Absolute(0.2),
                    include_dynamic_bodies: false,
                }),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id();

    let mut camera = Entity::PLACEHOLDER;
    let mut body = Entity::PLACEHOLDER;

    // Spawn camera as child of player
    commands.entity(player).with_children(|parent| {
        camera = parent
            .spawn((
                Camera3d::default(),
                Camera {
                    clear_color: ClearColorConfig::Custom(Color::srgb(0.55, 0.65, 0.75)),
                    ..default()
                },
                PlayerCamera::default(),
                Transform::from_xyz(0.0, config.eye_height, 0.0),
                // Main camera renders the world layer
                RenderLayers::layer(WORLD_LAYER),
            ))
            .with_children(|camera_parent| {
                // Viewmodel camera renders the body mesh and held item
                camera_parent
                    .spawn((
                        ViewmodelCamera,
                        Camera3d {
                            depth_load_op: Camera3dDepthLoadOp::Clear(0.0),
                            ..default()
                        },
                        Camera {
                            order: 1,
                            clear_color: ClearColorConfig::None,
                            ..default()
                        },
                        Transform::default(),
                        RenderLayers::layer(VIEWMODEL_LAYER),
                    ))
                    .with_children(|viewmodel| {
                        // Dedicated light so the body mesh isn't shadowed by world geometry
                        viewmodel.spawn((
                            PointLight {
                                color: Color::srgb(1.0, 0.95, 0.9),
                                intensity: 100000.0,
                                range: 10.0,
                                shadows_enabled: false,
                                ..default()
                            },
                            Transform::from_xyz(0.0, 0.5, 0.5),
                            RenderLayers::layer(VIEWMODEL_LAYER),
                        ));
                    });

                let (bx, by, bz) = config.body_offset;
                let (gx, gy, gz) = config.grip_offset;
                body = camera_parent
                    .spawn((
                        BodyMesh,
                        Name::new("Body"),
                        Transform::from_xyz(bx, by, bz),
                        // Shown once an item is picked up
                        Visibility::Hidden,
                        RenderLayers::layer(VIEWMODEL_LAYER),
                    ))
                    .with_children(|body_parent| {
                        match &config.body_model {
                            Some(model) => {
                                body_parent.spawn(SceneRoot(
                                    asset_server.load(format!("{}#Scene0", model)),
                                ));
                            }
                            None => {
                                // Placeholder forearm
                                body_parent.spawn((
                                    Mesh3d(meshes.add(Cuboid::new(0.09, 0.09, 0.45))),
                                    MeshMaterial3d(materials.add(StandardMaterial {
                                        base_color: Color::srgb(0.85, 0.7, 0.6),
                                        perceptual_roughness: 0.9,
                                        ..default()
                                    })),
                                    Transform::from_xyz(0.0, -0.05, 0.0),
                                ));
                            }
                        }
                        body_parent.spawn((
                            Name::new(GRIP_POINT),
                            Transform::from_xyz(gx, gy, gz),
                            Visibility::default(),
                        ));
                    })
                    .id();
            })
            .id();
    });

    // The inventory raycasts from the camera
    let mut inventory = Inventory::new(config.pickup_reach);
    inventory.set_camera(camera);

    commands.entity(player).insert((
        PlayerCharacter::new(config, camera, body),
        inventory,
        NeedsBodyAnimationSetup,
    ));

    player
}
