use bevy::math::{Vec2, Vec3};
use strum::Display;

/// What the center-of-view ray found this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum SurfaceStatus {
    #[default]
    NoSurface,
    Valid,
    Invalid,
}

impl SurfaceStatus {
    /// Only near-horizontal surfaces hold the bucket: the angle between the
    /// hit normal and up must stay strictly below `angle_limit`.
    pub fn classify(normal: Vec3, angle_limit: f32) -> Self {
        if !normal.is_finite() || normal.length_squared() <= f32::EPSILON {
            return Self::Invalid;
        }

        // atan2 keeps an exact-limit tilt from rounding under the limit
        let tilt = Vec2::new(normal.x, normal.z).length().atan2(normal.y);
        if tilt < angle_limit {
            Self::Valid
        } else {
            Self::Invalid
        }
    }

    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Quat;

    use super::*;

    const LIMIT: f32 = 0.3;

    fn tilted(angle: f32) -> Vec3 {
        Quat::from_rotation_z(angle) * Vec3::Y
    }

    #[test]
    fn test_flat_surface_is_valid() {
        assert_eq!(
            SurfaceStatus::classify(Vec3::Y, LIMIT),
            SurfaceStatus::Valid,
            "floor"
        );
    }

    #[test]
    fn test_slight_tilt_is_valid() {
        assert!(
            SurfaceStatus::classify(tilted(0.29), LIMIT).is_valid(),
            "0.29 rad"
        );
    }

    #[test]
    fn test_steep_surfaces_are_invalid() {
        for angle in [0.31, 0.8, core::f32::consts::FRAC_PI_2, 3.0] {
            assert_eq!(
                SurfaceStatus::classify(tilted(angle), LIMIT),
                SurfaceStatus::Invalid,
                "{angle} rad"
            );
        }
    }

    #[test]
    fn test_limit_itself_is_invalid() {
        assert_eq!(
            SurfaceStatus::classify(tilted(LIMIT), LIMIT),
            SurfaceStatus::Invalid,
            "angle equal to the limit"
        );
    }

    #[test]
    fn test_just_below_limit_is_valid() {
        assert_eq!(
            SurfaceStatus::classify(tilted(0.299_999_98), LIMIT),
            SurfaceStatus::Valid,
            "one ulp under the limit"
        );
    }

    #[test]
    fn test_unnormalized_normal_is_measured_by_direction() {
        assert!(
            SurfaceStatus::classify(Vec3::new(0.0, 4.0, 0.0), LIMIT).is_valid(),
            "length does not matter"
        );
    }

    #[test]
    fn test_degenerate_normal_is_invalid() {
        assert_eq!(
            SurfaceStatus::classify(Vec3::ZERO, LIMIT),
            SurfaceStatus::Invalid,
            "zero normal"
        );
        assert_eq!(
            SurfaceStatus::classify(Vec3::NAN, LIMIT),
            SurfaceStatus::Invalid,
            "nan normal"
        );
    }

    #[test]
    fn test_no_surface_is_not_valid() {
        assert!(!SurfaceStatus::NoSurface.is_valid(), "nothing hit");
    }
}
