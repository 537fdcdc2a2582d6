pub mod controls;
pub mod inputs;

use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Resource)]
#[reflect(Resource)]
pub struct HeadRigSettings {
    pub eye_position: Vec3,
    pub initial_pitch: f32,
    /// Meters per second
    pub move_speed: f32,
    /// Radians per second
    pub look_speed: f32,
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<inputs::Action>::default())
            .register_type::<HeadRigSettings>()
            .register_type::<HeadRig>()
            .insert_resource(HeadRigSettings {
                eye_position: Vec3::new(0.0, 1.6, 1.0),
                initial_pitch: -0.45,
                move_speed: 1.5,
                look_speed: 1.2,
            })
            .add_systems(Startup, setup)
            .add_systems(Update, controls::move_head);
    }
}

/// The viewer's head. Its pose aims the placement ray and launches balls.
#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct HeadRig {
    pub yaw: f32,
    pub pitch: f32,
}

impl HeadRig {
    pub const MAX_PITCH: f32 = 1.4;

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

fn setup(mut commands: Commands, settings: Res<HeadRigSettings>) {
    let rig = HeadRig {
        yaw: 0.0,
        pitch: settings.initial_pitch,
    };

    commands.spawn((
        Name::new("Head"),
        Camera3d::default(),
        Transform::from_translation(settings.eye_position).with_rotation(rig.rotation()),
        rig,
        InputManagerBundle::<inputs::Action> {
            input_map: inputs::create_input_map(),
            ..default()
        },
    ));
}
