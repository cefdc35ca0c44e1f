//! Level construction from data definitions.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::data::{ItemDef, ItemKind, LevelDefinition, PropDef, PropKind, WallDef};
use crate::inventory::InventoryItem;
use crate::weapons::{Equipment, GravityGun, GravityGunConfig};

/// Build a level from a level definition. Returns the player spawn position.
pub fn build_level_from_data(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    level: &LevelDefinition,
    gun_config: &GravityGunConfig,
) -> Vec3 {
    setup_environment(commands, level);
    spawn_floor(commands, meshes, materials, level);

    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.47, 0.5),
        perceptual_roughness: 0.95,
        ..default()
    });
    for wall in &level.walls {
        spawn_wall(commands, meshes, wall_material.clone(), wall);
    }

    for prop in &level.props {
        spawn_prop(commands, meshes, materials, prop);
    }

    for item in &level.items {
        spawn_item(commands, meshes, materials, item, gun_config);
    }

    level.player_start()
}

/// Set up global ambient light and directional light.
fn setup_environment(commands: &mut Commands, level: &LevelDefinition) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: level.ambient_brightness,
    });

    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 0.97, 0.92),
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3, // ~60 degrees down from horizontal
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}

fn spawn_floor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    level: &LevelDefinition,
) {
    let (width, depth) = level.floor_size;
    let thickness = 0.2;

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(width, thickness, depth))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.32, 0.3),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, -thickness / 2.0, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(width / 2.0, thickness / 2.0, depth / 2.0),
    ));
}

fn spawn_wall(commands: &mut Commands, meshes: &mut Assets<Mesh>, material: Handle<StandardMaterial>, wall: &WallDef) {
    let size = Vec3::from(wall.size);

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(material),
        Transform::from_translation(Vec3::from(wall.position)),
        RigidBody::Fixed,
        Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
    ));
}

/// Components every movable body needs for the gravity gun to push and hold it.
fn movable_body() -> impl Bundle {
    (
        RigidBody::Dynamic,
        Velocity::default(),
        ExternalImpulse::default(),
        GravityScale(1.0),
        Ccd::enabled(),
    )
}

fn spawn_prop(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    prop: &PropDef,
) {
    let s = prop.scale;
    let (mesh, collider, color) = match prop.kind {
        PropKind::Crate => (
            meshes.add(Cuboid::new(s, s, s)),
            Collider::cuboid(s / 2.0, s / 2.0, s / 2.0),
            Color::srgb(0.6, 0.42, 0.22),
        ),
        PropKind::Barrel => (
            meshes.add(Cylinder::new(0.4 * s, 1.2 * s)),
            Collider::cylinder(0.6 * s, 0.4 * s),
            Color::srgb(0.7, 0.2, 0.15),
        ),
        PropKind::Ball => (
            meshes.add(Sphere::new(0.5 * s)),
            Collider::ball(0.5 * s),
            Color::srgb(0.2, 0.4, 0.8),
        ),
    };

    let mut entity = commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: color,
            ..default()
        })),
        Transform::from_translation(Vec3::from(prop.position)),
        collider,
        movable_body(),
    ));

    if let Some(mass) = prop.mass {
        entity.insert(ColliderMassProperties::Mass(mass));
    }
}

fn spawn_item(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    item: &ItemDef,
    gun_config: &GravityGunConfig,
) {
    match item.kind {
        ItemKind::GravityGun => {
            let body_material = materials.add(StandardMaterial {
                base_color: Color::srgb(0.9, 0.55, 0.1),
                metallic: 0.6,
                perceptual_roughness: 0.4,
                ..default()
            });
            let prong_material = materials.add(StandardMaterial {
                base_color: Color::srgb(0.2, 0.2, 0.22),
                metallic: 0.8,
                ..default()
            });

            commands
                .spawn((
                    Name::new(gun_config.name.clone()),
                    InventoryItem::new(gun_config.name.clone()),
                    Equipment::new(GravityGun::new(gun_config.clone())),
                    Mesh3d(meshes.add(Cuboid::new(0.14, 0.16, 0.5))),
                    MeshMaterial3d(body_material),
                    Transform::from_translation(Vec3::from(item.position)),
                    Collider::cuboid(0.07, 0.08, 0.25),
                    movable_body(),
                ))
                .with_children(|gun| {
                    for x in [-0.05, 0.05] {
                        gun.spawn((
                            Mesh3d(meshes.add(Cuboid::new(0.02, 0.02, 0.18))),
                            MeshMaterial3d(prong_material.clone()),
                            Transform::from_xyz(x, 0.0, -0.32),
                        ));
                    }
                });
        }
    }
}
