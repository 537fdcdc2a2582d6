//! Spatial mapping session.
//!
//! The game asks for a session with [`StartSpatialMapping`], receives a
//! [`SpatialMappingStarted`] reply, and from then on gets one
//! [`SurfaceAddedOrUpdated`] per reconstructed surface patch. On desktop the
//! surfaces come from [`simulation::SimulatedRoom`].

pub mod simulation;

use core::fmt;

use bevy::prelude::*;
use thiserror::Error;

use simulation::SimulatedRoomPlugin;

/// Identifier the mapper gives to a surface patch. Stable across updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub struct SurfaceId(pub String);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SurfaceId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialMappingError {
    #[error("Spatial mapping extents must be positive, got {0:?}")]
    InvalidExtents(Vec3),

    #[error("Spatial mapping needs a triangle budget above zero")]
    NoTriangleBudget,

    #[error("Spatial mapping session is already running")]
    AlreadyRunning,

    #[error("Surface {id} needs {needed} triangles but only {remaining} remain")]
    BudgetExhausted {
        id: SurfaceId,
        needed: u32,
        remaining: u32,
    },
}

#[derive(Reflect, Resource, Debug, Clone)]
#[reflect(Resource)]
pub struct SpatialMappingSettings {
    /// Size of the scanned volume around the origin, in meters
    pub extents: Vec3,
    pub max_triangles: u32,
}

impl Default for SpatialMappingSettings {
    fn default() -> Self {
        Self {
            extents: Vec3::new(50.0, 50.0, 10.0),
            max_triangles: 1200,
        }
    }
}

impl SpatialMappingSettings {
    pub fn validate(&self) -> Result<(), SpatialMappingError> {
        if self.extents.min_element() <= 0.0 || !self.extents.is_finite() {
            return Err(SpatialMappingError::InvalidExtents(self.extents));
        }
        if self.max_triangles == 0 {
            return Err(SpatialMappingError::NoTriangleBudget);
        }
        Ok(())
    }

    /// Whether a surface centered at `center` lies inside the scanned volume
    pub fn contains(&self, center: Vec3) -> bool {
        let half = self.extents * 0.5;
        center.abs().cmple(half).all()
    }
}

#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub enum SpatialMappingSession {
    #[default]
    Idle,
    Running {
        triangles_used: u32,
    },
    Failed(SpatialMappingError),
}

impl SpatialMappingSession {
    pub fn start(&mut self, settings: &SpatialMappingSettings) -> Result<(), SpatialMappingError> {
        if self.is_running() {
            return Err(SpatialMappingError::AlreadyRunning);
        }

        if let Err(err) = settings.validate() {
            *self = Self::Failed(err.clone());
            return Err(err);
        }

        *self = Self::Running { triangles_used: 0 };
        Ok(())
    }

    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Charges a new surface against the triangle budget.
    pub fn reserve(
        &mut self,
        id: &SurfaceId,
        triangles: u32,
        settings: &SpatialMappingSettings,
    ) -> Result<(), SpatialMappingError> {
        let Self::Running { triangles_used } = self else {
            return Ok(());
        };

        let remaining = settings.max_triangles.saturating_sub(*triangles_used);
        if triangles > remaining {
            return Err(SpatialMappingError::BudgetExhausted {
                id: id.clone(),
                needed: triangles,
                remaining,
            });
        }

        *triangles_used += triangles;
        Ok(())
    }
}

/// A reconstructed surface patch. The mesh is in local space, placed by the
/// bounds transform.
#[derive(Debug, Clone)]
pub struct SpatialSurface {
    pub id: SurfaceId,
    pub bounds_center: Vec3,
    pub bounds_rotation: Quat,
    pub mesh: Mesh,
}

#[derive(Event)]
pub struct StartSpatialMapping;

#[derive(Event, Debug, Clone)]
pub struct SpatialMappingStarted(pub Result<(), SpatialMappingError>);

#[derive(Event, Debug, Clone)]
pub struct SurfaceAddedOrUpdated(pub SpatialSurface);

pub struct SpatialMappingPlugin;

impl Plugin for SpatialMappingPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SpatialMappingSettings>()
            .init_resource::<SpatialMappingSettings>()
            .init_resource::<SpatialMappingSession>()
            .add_event::<StartSpatialMapping>()
            .add_event::<SpatialMappingStarted>()
            .add_event::<SurfaceAddedOrUpdated>()
            .add_plugins(SimulatedRoomPlugin)
            .add_systems(Update, start_sessions);
    }
}

fn start_sessions(
    mut requests: EventReader<StartSpatialMapping>,
    mut replies: EventWriter<SpatialMappingStarted>,
    mut session: ResMut<SpatialMappingSession>,
    settings: Res<SpatialMappingSettings>,
) {
    for _ in requests.read() {
        let result = session.start(&settings);
        match &result {
            Ok(()) => info!(
                "Spatial mapping started: extents {:?}, {} triangles",
                settings.extents, settings.max_triangles
            ),
            Err(err) => error!("Spatial mapping failed to start: {err}"),
        }
        replies.send(SpatialMappingStarted(result));
    }
}

pub fn triangle_count(mesh: &Mesh) -> u32 {
    let count = mesh
        .indices()
        .map_or_else(|| mesh.count_vertices(), |indices| indices.len());
    (count / 3) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert_eq!(
            SpatialMappingSettings::default().validate(),
            Ok(()),
            "defaults must start a session"
        );
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let flat = SpatialMappingSettings {
            extents: Vec3::new(50.0, 0.0, 10.0),
            ..default()
        };
        assert!(
            matches!(flat.validate(), Err(SpatialMappingError::InvalidExtents(_))),
            "zero height volume"
        );

        let no_budget = SpatialMappingSettings {
            max_triangles: 0,
            ..default()
        };
        assert_eq!(
            no_budget.validate(),
            Err(SpatialMappingError::NoTriangleBudget),
            "zero triangles"
        );
    }

    #[test]
    fn test_contains_uses_half_extents() {
        let settings = SpatialMappingSettings::default();
        assert!(settings.contains(Vec3::new(24.0, -10.0, 4.9)), "inside");
        assert!(!settings.contains(Vec3::new(0.0, 0.0, 5.5)), "past depth");
    }

    #[test]
    fn test_session_cannot_start_twice() {
        let settings = SpatialMappingSettings::default();
        let mut session = SpatialMappingSession::default();
        assert_eq!(session.start(&settings), Ok(()), "first start");
        assert_eq!(
            session.start(&settings),
            Err(SpatialMappingError::AlreadyRunning),
            "second start"
        );
    }

    #[test]
    fn test_failed_start_is_remembered() {
        let settings = SpatialMappingSettings {
            max_triangles: 0,
            ..default()
        };
        let mut session = SpatialMappingSession::default();
        assert!(session.start(&settings).is_err(), "start must fail");
        assert_eq!(
            session,
            SpatialMappingSession::Failed(SpatialMappingError::NoTriangleBudget),
            "failure kept in the session"
        );
    }

    #[test]
    fn test_reserve_tracks_budget() {
        let settings = SpatialMappingSettings {
            max_triangles: 100,
            ..default()
        };
        let mut session = SpatialMappingSession::default();
        session.start(&settings).ok();

        let id = SurfaceId::from("floor");
        assert_eq!(session.reserve(&id, 60, &settings), Ok(()), "fits");
        assert_eq!(
            session.reserve(&id, 50, &settings),
            Err(SpatialMappingError::BudgetExhausted {
                id: id.clone(),
                needed: 50,
                remaining: 40,
            }),
            "over budget"
        );
        assert_eq!(
            session,
            SpatialMappingSession::Running { triangles_used: 60 },
            "rejected surface costs nothing"
        );
    }

    #[test]
    fn test_start_request_updates_session() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<SpatialMappingSettings>()
            .init_resource::<SpatialMappingSession>()
            .add_event::<StartSpatialMapping>()
            .add_event::<SpatialMappingStarted>()
            .add_systems(Update, start_sessions);

        app.world_mut().send_event(StartSpatialMapping);
        app.update();

        assert!(
            app.world().resource::<SpatialMappingSession>().is_running(),
            "session running after the request"
        );
    }
}
