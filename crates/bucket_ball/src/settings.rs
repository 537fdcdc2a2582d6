use bevy::prelude::*;

use crate::gameplay::surface::SurfaceStatus;

#[derive(Reflect, Resource, Debug, Clone)]
#[reflect(Resource)]
pub struct GameSettings {
    /// Largest angle (radians) between a surface normal and up that still
    /// accepts the bucket
    pub surface_angle_limit: f32,
    pub raycast_distance: f32,

    pub max_power: f32,
    /// Gauge change per frame while charging
    pub power_step: f32,

    pub ball_scale: f32,
    pub ball_mass: f32,
    pub ball_friction: f32,
    /// Live balls kept in the scene before the oldest is recycled
    pub max_balls: usize,
    /// Launch direction in camera space, scaled by the locked power
    pub throw_direction: Vec3,
    pub kill_plane_y: f32,

    pub bucket_radius: f32,
    pub bucket_height: f32,
    /// Detection volume radius relative to the bucket radius
    pub detection_scale: f32,

    pub valid_color: Color,
    pub invalid_color: Color,
    pub sfx_gain: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            surface_angle_limit: 0.3,
            raycast_distance: 100.0,
            max_power: 15.0,
            power_step: 0.05,
            ball_scale: 0.15,
            ball_mass: 1.0,
            ball_friction: 0.5,
            max_balls: 3,
            // Cameras look down -Z
            throw_direction: Vec3::new(0.0, 0.25, -1.0),
            kill_plane_y: -20.0,
            bucket_radius: 0.12,
            bucket_height: 0.18,
            detection_scale: 2.0,
            valid_color: Color::srgb(0.0, 1.0, 0.0),
            invalid_color: Color::srgb(1.0, 0.0, 0.0),
            sfx_gain: 0.8,
        }
    }
}

impl GameSettings {
    pub fn preview_color(&self, status: SurfaceStatus) -> Color {
        match status {
            // Nothing under the crosshair is not the player's fault
            SurfaceStatus::Valid | SurfaceStatus::NoSurface => self.valid_color,
            SurfaceStatus::Invalid => self.invalid_color,
        }
    }
}
