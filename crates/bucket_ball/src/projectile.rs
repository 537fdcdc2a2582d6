use std::collections::VecDeque;

use avian3d::prelude::*;
use bevy::ecs::world::Command;
use bevy::prelude::*;

use crate::scene::GameLayer;
use crate::settings::GameSettings;

pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Ball>().add_systems(Startup, setup);
    }
}

#[derive(Component, Reflect, Default, Debug)]
#[reflect(Component)]
pub struct Ball;

#[derive(Resource)]
struct BallAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

/// Live balls in throw order. Admitting past capacity evicts the oldest.
#[derive(Resource, Debug)]
pub struct ProjectilePool {
    live: VecDeque<Entity>,
    capacity: usize,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            live: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds a ball and returns the one that has to make room for it.
    pub fn admit(&mut self, ball: Entity) -> Option<Entity> {
        let evicted = if self.live.len() >= self.capacity {
            self.live.pop_front()
        } else {
            None
        };
        self.live.push_back(ball);
        evicted
    }

    pub fn forget(&mut self, ball: Entity) {
        self.live.retain(|live| *live != ball);
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

pub fn launch_velocity(rotation: Quat, direction: Vec3, power: f32) -> Vec3 {
    rotation * direction * power
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<GameSettings>,
) {
    commands.insert_resource(BallAssets {
        mesh: meshes.add(Sphere::default().mesh().uv(16, 8)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.93, 0.45, 0.1),
            perceptual_roughness: 0.8,
            ..default()
        }),
    });
    commands.insert_resource(ProjectilePool::new(settings.max_balls));
}

/// Spawns a ball at the head pose and sends it off with the locked power.
pub struct ThrowBall {
    pub position: Vec3,
    pub rotation: Quat,
    pub power: f32,
}

impl Command for ThrowBall {
    fn apply(self, world: &mut World) {
        let Some(settings) = world.get_resource::<GameSettings>().cloned() else {
            error!("Could not find resource GameSettings");
            return;
        };
        let Some(assets) = world.get_resource::<BallAssets>() else {
            return;
        };
        let (mesh, material) = (assets.mesh.clone(), assets.material.clone());

        let velocity = launch_velocity(self.rotation, settings.throw_direction, self.power);

        let ball = world
            .spawn((
                Name::new("Ball"),
                Ball,
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(self.position)
                    .with_rotation(self.rotation)
                    .with_scale(Vec3::splat(settings.ball_scale)),
                RigidBody::Dynamic,
                // Unit sphere, sized by the transform scale
                Collider::sphere(0.5),
                Mass(settings.ball_mass),
                Friction::new(settings.ball_friction),
                LinearVelocity(velocity),
                CollisionLayers::new(
                    GameLayer::Ball,
                    [GameLayer::Environment, GameLayer::Bucket, GameLayer::Ball],
                ),
            ))
            .id();

        let evicted = world
            .get_resource_mut::<ProjectilePool>()
            .and_then(|mut pool| pool.admit(ball));
        if let Some(oldest) = evicted {
            debug!("Recycling ball {oldest}");
            world.despawn(oldest);
        }

        let live = world
            .get_resource::<ProjectilePool>()
            .map_or(0, ProjectilePool::len);
        debug!("Threw ball {ball} with velocity {velocity}, {live} in play");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn throw_world() -> World {
        let mut world = World::new();
        world.insert_resource(GameSettings::default());
        world.insert_resource(ProjectilePool::new(3));
        world.insert_resource(BallAssets {
            mesh: Handle::default(),
            material: Handle::default(),
        });
        world
    }

    fn throw(world: &mut World) {
        ThrowBall {
            position: Vec3::new(0.0, 1.6, 0.0),
            rotation: Quat::IDENTITY,
            power: 5.0,
        }
        .apply(world);
    }

    fn live_balls(world: &mut World) -> Vec<Entity> {
        let mut query = world.query_filtered::<Entity, With<Ball>>();
        query.iter(world).collect()
    }

    #[test]
    fn test_fourth_throw_despawns_the_oldest_ball() {
        let mut world = throw_world();
        throw(&mut world);
        let oldest = live_balls(&mut world);
        assert_eq!(oldest.len(), 1, "first ball");

        for _ in 0..3 {
            throw(&mut world);
        }

        let live = live_balls(&mut world);
        assert_eq!(live.len(), 3, "capped at three");
        assert!(
            oldest.iter().all(|ball| !live.contains(ball)),
            "oldest ball recycled"
        );
        assert_eq!(world.resource::<ProjectilePool>().len(), 3, "pool in sync");
    }

    #[test]
    fn test_thrown_ball_carries_launch_velocity() {
        let mut world = throw_world();
        throw(&mut world);

        let mut query = world.query_filtered::<&LinearVelocity, With<Ball>>();
        let velocities: Vec<Vec3> = query.iter(&world).map(|velocity| velocity.0).collect();
        let expected = launch_velocity(
            Quat::IDENTITY,
            GameSettings::default().throw_direction,
            5.0,
        );
        assert_eq!(velocities, vec![expected], "locked power times direction");
    }

    #[test]
    fn test_pool_evicts_oldest_past_capacity() {
        let mut pool = ProjectilePool::new(3);
        let balls: Vec<Entity> = (0..4).map(Entity::from_raw).collect();

        for ball in balls.iter().take(3) {
            assert_eq!(pool.admit(*ball), None, "room left");
        }
        assert_eq!(pool.admit(Entity::from_raw(3)), Some(Entity::from_raw(0)), "oldest out");
        assert_eq!(pool.len(), 3, "never above capacity");
    }

    #[test]
    fn test_forgotten_balls_free_their_slot() {
        let mut pool = ProjectilePool::new(2);
        pool.admit(Entity::from_raw(0));
        pool.admit(Entity::from_raw(1));
        pool.forget(Entity::from_raw(0));

        assert_eq!(pool.admit(Entity::from_raw(2)), None, "slot was freed");
        assert_eq!(
            pool.admit(Entity::from_raw(3)),
            Some(Entity::from_raw(1)),
            "next oldest"
        );
    }

    #[test]
    fn test_zero_capacity_still_keeps_one_ball() {
        let mut pool = ProjectilePool::new(0);
        assert_eq!(pool.admit(Entity::from_raw(0)), None, "first ball kept");
        assert!(!pool.is_empty(), "one live ball");
    }

    #[test]
    fn test_launch_velocity_scales_with_power() {
        let direction = GameSettings::default().throw_direction;
        let slow = launch_velocity(Quat::IDENTITY, direction, 1.0);
        let fast = launch_velocity(Quat::IDENTITY, direction, 10.0);

        assert!(slow.z < 0.0 && slow.y > 0.0, "forward and up");
        assert!(
            (fast.length() - 10.0 * slow.length()).abs() < 1e-4,
            "proportional to power"
        );
    }

    #[test]
    fn test_zero_power_gives_zero_velocity() {
        let velocity = launch_velocity(
            Quat::from_rotation_y(1.2),
            GameSettings::default().throw_direction,
            0.0,
        );
        assert_eq!(velocity, Vec3::ZERO, "ball just drops");
    }

    #[test]
    fn test_launch_follows_head_rotation() {
        let turned = Quat::from_rotation_y(core::f32::consts::FRAC_PI_2);
        let velocity = launch_velocity(turned, Vec3::new(0.0, 0.25, -1.0), 4.0);
        assert!((velocity - Vec3::new(-4.0, 1.0, 0.0)).length() < 1e-4, "facing -X");
    }
}
