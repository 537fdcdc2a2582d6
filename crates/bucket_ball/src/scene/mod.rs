pub mod bucket;
pub mod environment;

use avian3d::prelude::*;
use bevy::pbr::{CascadeShadowConfigBuilder, DirectionalLightShadowMap};
use bevy::prelude::*;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 500.0,
        })
        .insert_resource(DirectionalLightShadowMap { size: 2048 })
        .add_plugins((bucket::BucketPlugin, environment::EnvironmentPlugin))
        .add_systems(Startup, setup);
    }
}

#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Reconstructed real world surfaces. The only layer the placement ray sees.
    Environment,
    Bucket,
    Ball,
}

fn setup(mut commands: Commands) {
    let shadow_config = CascadeShadowConfigBuilder {
        maximum_distance: 10.0,
        ..default()
    };

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(1.0, 4.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
        shadow_config.build(),
    ));
}
