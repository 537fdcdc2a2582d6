use core::f32::consts::FRAC_PI_2;
use core::time::Duration;

use bevy::prelude::*;

use super::{
    SpatialMappingSession, SpatialMappingSettings, SpatialSurface, SurfaceAddedOrUpdated,
    SurfaceId, triangle_count,
};

// Stands in for the device's surface reconstruction on desktop builds.
// Surfaces are discovered one per scan, then refined (re-sent) at random.
pub struct SimulatedRoomPlugin;

impl Plugin for SimulatedRoomPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulatedRoom::living_room())
            .add_systems(Update, scan_room.run_if(session_running));
    }
}

#[derive(Debug, Clone)]
pub struct RoomPatch {
    pub id: SurfaceId,
    pub center: Vec3,
    pub rotation: Quat,
    pub size: Vec2,
    pub subdivisions: u32,
}

impl RoomPatch {
    fn new(id: &str, center: Vec3, rotation: Quat, size: Vec2) -> Self {
        Self {
            id: id.into(),
            center,
            rotation,
            size,
            subdivisions: 3,
        }
    }

    pub fn mesh(&self) -> Mesh {
        Plane3d::new(Vec3::Y, self.size * 0.5)
            .mesh()
            .subdivisions(self.subdivisions)
            .build()
    }

    fn to_surface(&self) -> SpatialSurface {
        SpatialSurface {
            id: self.id.clone(),
            bounds_center: self.center,
            bounds_rotation: self.rotation,
            mesh: self.mesh(),
        }
    }
}

#[derive(Resource, Debug)]
pub struct SimulatedRoom {
    patches: Vec<RoomPatch>,
    discovered: usize,
    scan_timer: Timer,
}

impl SimulatedRoom {
    pub fn new(patches: Vec<RoomPatch>, scan_interval: Duration) -> Self {
        Self {
            patches,
            discovered: 0,
            scan_timer: Timer::new(scan_interval, TimerMode::Repeating),
        }
    }

    /// Floor, a table, a shelf, a tilted board and the back wall.
    pub fn living_room() -> Self {
        Self::new(
            vec![
                RoomPatch::new("floor", Vec3::new(0.0, 0.0, -1.0), Quat::IDENTITY, Vec2::splat(6.0)),
                RoomPatch::new(
                    "table",
                    Vec3::new(0.6, 0.75, -2.0),
                    Quat::IDENTITY,
                    Vec2::new(1.2, 0.8),
                ),
                RoomPatch::new(
                    "leaning-board",
                    Vec3::new(-1.5, 0.4, -2.0),
                    Quat::from_rotation_z(0.45),
                    Vec2::new(1.0, 1.0),
                ),
                RoomPatch::new(
                    "shelf",
                    Vec3::new(1.8, 1.1, -3.5),
                    Quat::IDENTITY,
                    Vec2::new(0.8, 0.4),
                ),
                RoomPatch::new(
                    "back-wall",
                    Vec3::new(0.0, 1.5, -4.0),
                    Quat::from_rotation_x(FRAC_PI_2),
                    Vec2::new(6.0, 3.0),
                ),
            ],
            Duration::from_millis(750),
        )
    }

    /// Next surface to report: undiscovered patches first, then a random
    /// refinement of one already known.
    pub fn next_scan(&mut self) -> Option<&RoomPatch> {
        if self.discovered < self.patches.len() {
            let patch = self.patches.get(self.discovered);
            self.discovered += 1;
            return patch;
        }

        if self.patches.is_empty() {
            return None;
        }
        let index = fastrand::usize(..self.patches.len());
        self.patches.get(index)
    }

    pub const fn discovered(&self) -> usize {
        self.discovered
    }
}

fn session_running(session: Res<SpatialMappingSession>) -> bool {
    session.is_running()
}

fn scan_room(
    mut room: ResMut<SimulatedRoom>,
    mut session: ResMut<SpatialMappingSession>,
    settings: Res<SpatialMappingSettings>,
    mut surfaces: EventWriter<SurfaceAddedOrUpdated>,
    time: Res<Time>,
) {
    room.scan_timer.tick(time.delta());
    if !room.scan_timer.just_finished() {
        return;
    }

    let is_new = room.discovered() < room.patches.len();
    let Some(patch) = room.next_scan() else {
        return;
    };

    if !settings.contains(patch.center) {
        debug!("Surface {} is outside the mapped volume", patch.id);
        return;
    }

    let surface = patch.to_surface();

    // Refinements reuse the budget already charged for the surface
    if is_new {
        let triangles = triangle_count(&surface.mesh);
        if let Err(err) = session.reserve(&surface.id, triangles, &settings) {
            warn!("{err}");
            return;
        }
    }

    surfaces.send(SurfaceAddedOrUpdated(surface));
}
