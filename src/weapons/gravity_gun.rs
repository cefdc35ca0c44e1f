//! The gravity gun: attract physics props, hold them, and launch them.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::Deserialize;

use super::equippable::{Equippable, ItemContext};
use crate::core::load_or_default;

const GRAVITY_GUN_CONFIG_PATH: &str = "assets/data/weapons/gravity_gun.ron";

/// Gravity gun tuning loaded from assets/data/weapons/gravity_gun.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct GravityGunConfig {
    pub name: String,
    /// Maximum distance at which Attract grabs a prop
    pub attract_range: f32,
    /// Distance in front of the camera a held prop floats at
    pub hold_distance: f32,
    /// Spring strength pulling the held prop to its hold point
    pub hold_stiffness: f32,
    /// Speed cap while pulling a held prop
    pub max_hold_speed: f32,
    /// Impulse applied when launching a held prop
    pub launch_impulse: f32,
    /// Maximum distance for punting a prop that is not held
    pub punt_range: f32,
    pub punt_impulse: f32,
    /// Random torque impulse added on launch
    pub launch_spin: f32,
    /// Local offset from the grip point once equipped
    pub grip_offset: (f32, f32, f32),
    /// Local rotation from the grip point once equipped (degrees, XYZ)
    pub grip_rotation: (f32, f32, f32),
}

impl Default for GravityGunConfig {
    fn default() -> Self {
        Self {
            name: "Gravity Gun".to_string(),
            attract_range: 12.0,
            hold_distance: 2.5,
            hold_stiffness: 12.0,
            max_hold_speed: 25.0,
            launch_impulse: 25.0,
            punt_range: 6.0,
            punt_impulse: 8.0,
            launch_spin: 0.5,
            grip_offset: (0.0, 0.0, 0.0),
            grip_rotation: (0.0, 0.0, 0.0),
        }
    }
}

impl GravityGunConfig {
    pub fn load() -> Self {
        load_or_default(GRAVITY_GUN_CONFIG_PATH)
    }

    fn grip_transform(&self) -> Transform {
        let (x, y, z) = self.grip_offset;
        let (rx, ry, rz) = self.grip_rotation;
        Transform::from_xyz(x, y, z).with_rotation(Quat::from_euler(
            EulerRot::XYZ,
            rx.to_radians(),
            ry.to_radians(),
            rz.to_radians(),
        ))
    }
}

/// System to load gravity gun tuning at startup.
pub fn load_gravity_gun_config(mut commands: Commands) {
    commands.insert_resource(GravityGunConfig::load());
}

/// A prop pulled towards a point in front of `anchor`.
#[derive(Component, Debug, Clone, Copy)]
pub struct HeldObject {
    /// Camera (or holder) the hold point is measured from
    pub anchor: Entity,
    pub distance: f32,
    pub stiffness: f32,
    pub max_speed: f32,
}

/// Gravity gun state. Holds at most one prop.
#[derive(Debug, Clone)]
pub struct GravityGun {
    config: GravityGunConfig,
    held: Option<Entity>,
}

impl GravityGun {
    pub fn new(config: GravityGunConfig) -> Self {
        Self { config, held: None }
    }

    pub fn held(&self) -> Option<Entity> {
        self.held
    }

    fn grab(&mut self, ctx: &mut ItemContext, target: Entity) {
        let held = HeldObject {
            anchor: ctx.aim.camera.unwrap_or(ctx.holder),
            distance: self.config.hold_distance,
            stiffness: self.config.hold_stiffness,
            max_speed: self.config.max_hold_speed,
        };
        if let Some(mut entity) = ctx.commands.get_entity(target) {
            entity.insert((held, GravityScale(0.0)));
            self.held = Some(target);
        }
    }

    fn release(&mut self, ctx: &mut ItemContext) -> Option<Entity> {
        let held = self.held.take()?;
        let mut entity = ctx.commands.get_entity(held)?;
        entity.remove::<HeldObject>().insert(GravityScale(1.0));
        Some(held)
    }

    fn random_spin(&self) -> Vec3 {
        let spin = self.config.launch_spin;
        Vec3::new(
            (rand::random::<f32>() - 0.5) * 2.0 * spin,
            (rand::random::<f32>() - 0.5) * 2.0 * spin,
            (rand::random::<f32>() - 0.5) * 2.0 * spin,
        )
    }
}

impl Equippable for GravityGun {
    fn name(&self) -> &str {
        &self.config.name
    }

    /// Launch the held prop, or punt the dynamic body in range.
    fn fire(&mut self, ctx: &mut ItemContext) {
        let direction = ctx.aim.direction;

        if let Some(launched) = self.release(ctx) {
            let impulse = ExternalImpulse {
                impulse: direction * self.config.launch_impulse,
                torque_impulse: self.random_spin(),
            };
            if let Some(mut entity) = ctx.commands.get_entity(launched) {
                entity.insert(impulse);
            }
            debug!("Launched {:?}", launched);
            return;
        }

        let Some(target) = ctx
            .target
            .filter(|hit| hit.dynamic && hit.distance <= self.config.punt_range)
        else {
            return;
        };
        if let Some(mut entity) = ctx.commands.get_entity(target.entity) {
            entity.insert(ExternalImpulse {
                impulse: direction * self.config.punt_impulse,
                torque_impulse: Vec3::ZERO,
            });
        }
    }

    /// Toggle: release the held prop, or grab the dynamic body in range.
    fn secondary_fire(&mut self, ctx: &mut ItemContext) {
        if self.release(ctx).is_some() {
            return;
        }

        if let Some(target) = ctx
            .target
            .filter(|hit| hit.dynamic && hit.distance <= self.config.attract_range)
        {
            self.grab(ctx, target.entity);
        }
    }

    fn set_pickup_properties(&mut self, ctx: &mut ItemContext) {
        if let Some(mut entity) = ctx.commands.get_entity(ctx.item) {
            entity.insert((RigidBodyDisabled, ColliderDisabled, self.config.grip_transform()));
        }
    }

    fn set_drop_properties(&mut self, ctx: &mut ItemContext) {
        self.release(ctx);
        if let Some(mut entity) = ctx.commands.get_entity(ctx.item) {
            entity.remove::<(RigidBodyDisabled, ColliderDisabled)>();
        }
    }
}

/// Pull held props towards their hold point.
///
/// Props that are not dynamic, or whose anchor vanished, are let go.
pub fn update_held_objects(
    mut commands: Commands,
    anchors: Query<&GlobalTransform>,
    mut held_query: Query<(Entity, &HeldObject, &GlobalTransform, Option<&RigidBody>, Option<&mut Velocity>)>,
) {
    for (entity, held, transform, body, velocity) in held_query.iter_mut() {
        let (Some(RigidBody::Dynamic), Some(mut velocity)) = (body, velocity) else {
            commands.entity(entity).remove::<HeldObject>().insert(GravityScale(1.0));
            continue;
        };
        let Ok(anchor) = anchors.get(held.anchor) else {
            commands.entity(entity).remove::<HeldObject>().insert(GravityScale(1.0));
            continue;
        };

        let hold_point = anchor.translation() + anchor.forward().as_vec3() * held.distance;
        let offset = hold_point - transform.translation();

        velocity.linvel = (offset * held.stiffness).clamp_length_max(held.max_speed);
        velocity.angvel *= 0.8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::world::CommandQueue;

    use crate::inventory::RayHit;
    use crate::weapons::equippable::Aim;

    struct Scene {
        world: World,
        item: Entity,
        holder: Entity,
        camera: Entity,
        prop: Entity,
    }

    fn scene() -> Scene {
        let mut world = World::new();
        let item = world.spawn_empty().id();
        let holder = world.spawn_empty().id();
        let camera = world.spawn(GlobalTransform::default()).id();
        let prop = world.spawn(RigidBody::Dynamic).id();
        Scene {
            world,
            item,
            holder,
            camera,
            prop,
        }
    }

    /// Run one hook with a context aimed down -Z at `target`.
    fn run(
        scene: &mut Scene,
        gun: &mut GravityGun,
        target: Option<RayHit>,
        hook: impl FnOnce(&mut GravityGun, &mut ItemContext),
    ) {
        let mut queue = CommandQueue::default();
        {
            let mut commands = Commands::new(&mut queue, &scene.world);
            let mut ctx = ItemContext {
                commands: &mut commands,
                item: scene.item,
                holder: scene.holder,
                aim: Aim {
                    camera: Some(scene.camera),
                    ..default()
                },
                target,
            };
            hook(gun, &mut ctx);
        }
        queue.apply(&mut scene.world);
    }

    fn hit(entity: Entity, distance: f32) -> Option<RayHit> {
        Some(RayHit {
            entity,
            point: Vec3::NEG_Z * distance,
            distance,
            dynamic: true,
        })
    }

    fn static_hit(entity: Entity, distance: f32) -> Option<RayHit> {
        hit(entity, distance).map(|hit| RayHit { dynamic: false, ..hit })
    }

    #[test]
    fn attract_grabs_prop_in_range() {
        let mut scene = scene();
        let mut gun = GravityGun::new(GravityGunConfig::default());
        let prop = scene.prop;

        run(&mut scene, &mut gun, hit(prop, 5.0), |gun, ctx| gun.secondary_fire(ctx));

        assert_eq!(gun.held(), Some(prop));
        let held = scene.world.get::<HeldObject>(prop).unwrap();
        assert_eq!(held.anchor, scene.camera);
        assert_eq!(scene.world.get::<GravityScale>(prop).map(|g| g.0), Some(0.0));
    }

    #[test]
    fn attract_ignores_prop_out_of_range() {
        let mut scene = scene();
        let mut gun = GravityGun::new(GravityGunConfig::default());
        let prop = scene.prop;

        run(&mut scene, &mut gun, hit(prop, 50.0), |gun, ctx| gun.secondary_fire(ctx));

        assert_eq!(gun.held(), None);
        assert!(scene.world.get::<HeldObject>(prop).is_none());
    }

    #[test]
    fn attract_again_releases() {
        let mut scene = scene();
        let mut gun = GravityGun::new(GravityGunConfig::default());
        let prop = scene.prop;

        run(&mut scene, &mut gun, hit(prop, 5.0), |gun, ctx| gun.secondary_fire(ctx));
        run(&mut scene, &mut gun, hit(prop, 5.0), |gun, ctx| gun.secondary_fire(ctx));

        assert_eq!(gun.held(), None);
        assert!(scene.world.get::<HeldObject>(prop).is_none());
        assert_eq!(scene.world.get::<GravityScale>(prop).map(|g| g.0), Some(1.0));
    }

    #[test]
    fn attract_ignores_static_geometry() {
        let mut scene = scene();
        let mut gun = GravityGun::new(GravityGunConfig::default());
        let wall = scene.world.spawn(RigidBody::Fixed).id();
        let prop = scene.prop;

        run(&mut scene, &mut gun, static_hit(wall, 4.0), |gun, ctx| gun.secondary_fire(ctx));

        assert_eq!(gun.held(), None);
        assert!(scene.world.get::<HeldObject>(wall).is_none());
        assert!(scene.world.get::<GravityScale>(wall).is_none());

        // Launch right after still punts the prop under the crosshair
        run(&mut scene, &mut gun, hit(prop, 2.0), |gun, ctx| gun.fire(ctx));

        assert!(scene.world.get::<ExternalImpulse>(wall).is_none());
        assert!(scene.world.get::<ExternalImpulse>(prop).is_some());
    }

    #[test]
    fn fire_does_not_punt_static_geometry() {
        let mut scene = scene();
        let mut gun = GravityGun::new(GravityGunConfig::default());
        let wall = scene.world.spawn(RigidBody::Fixed).id();

        run(&mut scene, &mut gun, static_hit(wall, 2.0), |gun, ctx| gun.fire(ctx));

        assert!(scene.world.get::<ExternalImpulse>(wall).is_none());
    }

    #[test]
    fn launch_throws_held_prop_along_aim() {
        let mut scene = scene();
        let config = GravityGunConfig {
            launch_spin: 0.0,
            ..default()
        };
        let launch = config.launch_impulse;
        let mut gun = GravityGun::new(config);
        let prop = scene.prop;

        run(&mut scene, &mut gun, hit(prop, 5.0), |gun, ctx| gun.secondary_fire(ctx));
        run(&mut scene, &mut gun, None, |gun, ctx| gun.fire(ctx));

        assert_eq!(gun.held(), None);
        assert!(scene.world.get::<HeldObject>(prop).is_none());
        let impulse = scene.world.get::<ExternalImpulse>(prop).unwrap();
        assert_eq!(impulse.impulse, Vec3::NEG_Z * launch);
        assert_eq!(impulse.torque_impulse, Vec3::ZERO);
    }

    #[test]
    fn fire_without_hold_punts_nearby_prop() {
        let mut scene = scene();
        let config = GravityGunConfig::default();
        let punt = config.punt_impulse;
        let mut gun = GravityGun::new(config);
        let prop = scene.prop;

        run(&mut scene, &mut gun, hit(prop, 2.0), |gun, ctx| gun.fire(ctx));

        let impulse = scene.world.get::<ExternalImpulse>(prop).unwrap();
        assert_eq!(impulse.impulse, Vec3::NEG_Z * punt);
    }

    #[test]
    fn fire_at_nothing_does_nothing() {
        let mut scene = scene();
        let mut gun = GravityGun::new(GravityGunConfig::default());
        let prop = scene.prop;

        run(&mut scene, &mut gun, hit(prop, 30.0), |gun, ctx| gun.fire(ctx));

        assert!(scene.world.get::<ExternalImpulse>(prop).is_none());
    }

    #[test]
    fn pickup_disables_physics_and_drop_restores_it() {
        let mut scene = scene();
        let mut gun = GravityGun::new(GravityGunConfig::default());
        let item = scene.item;

        run(&mut scene, &mut gun, None, |gun, ctx| gun.set_pickup_properties(ctx));
        assert!(scene.world.get::<RigidBodyDisabled>(item).is_some());
        assert!(scene.world.get::<ColliderDisabled>(item).is_some());

        run(&mut scene, &mut gun, None, |gun, ctx| gun.set_drop_properties(ctx));
        assert!(scene.world.get::<RigidBodyDisabled>(item).is_none());
        assert!(scene.world.get::<ColliderDisabled>(item).is_none());
    }

    #[test]
    fn dropping_the_gun_lets_go_of_the_prop() {
        let mut scene = scene();
        let mut gun = GravityGun::new(GravityGunConfig::default());
        let prop = scene.prop;

        run(&mut scene, &mut gun, hit(prop, 5.0), |gun, ctx| gun.secondary_fire(ctx));
        run(&mut scene, &mut gun, None, |gun, ctx| gun.set_drop_properties(ctx));

        assert_eq!(gun.held(), None);
        assert!(scene.world.get::<HeldObject>(prop).is_none());
    }

    #[test]
    fn held_prop_is_pulled_towards_hold_point() {
        let mut app = App::new();
        app.add_systems(Update, update_held_objects);

        let camera = app.world_mut().spawn(GlobalTransform::default()).id();
        let prop = app
            .world_mut()
            .spawn((
                RigidBody::Dynamic,
                Velocity::default(),
                GlobalTransform::from_translation(Vec3::new(0.0, 0.0, -1.0)),
                HeldObject {
                    anchor: camera,
                    distance: 2.0,
                    stiffness: 10.0,
                    max_speed: 100.0,
                },
            ))
            .id();

        app.update();

        let velocity = app.world().get::<Velocity>(prop).unwrap();
        assert!((velocity.linvel - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn fixed_bodies_are_let_go() {
        let mut app = App::new();
        app.add_systems(Update, update_held_objects);

        let camera = app.world_mut().spawn(GlobalTransform::default()).id();
        let prop = app
            .world_mut()
            .spawn((
                RigidBody::Fixed,
                GlobalTransform::default(),
                HeldObject {
                    anchor: camera,
                    distance: 2.0,
                    stiffness: 10.0,
                    max_speed: 100.0,
                },
            ))
            .id();

        app.update();

        assert!(app.world().get::<HeldObject>(prop).is_none());
    }

    #[test]
    fn shipped_config_parses() {
        let config: GravityGunConfig = crate::core::parse_ron(
            GRAVITY_GUN_CONFIG_PATH,
            include_str!("../../assets/data/weapons/gravity_gun.ron"),
        )
        .unwrap();
        assert_eq!(config.name, "Gravity Gun");
        assert!(config.punt_range < config.attract_range);
    }
}
