use std::collections::HashMap;

use ar_helpers::spatial::{SpatialSurface, SurfaceAddedOrUpdated, SurfaceId};
use avian3d::prelude::*;
use bevy::prelude::*;

use crate::scene::GameLayer;

pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnvironmentRegistry>()
            .add_systems(Startup, setup)
            .add_systems(Update, surface_added_or_updated);
    }
}

#[derive(Component, Debug)]
pub struct EnvironmentSurface(pub SurfaceId);

#[derive(Resource)]
struct SpatialMaterial(Handle<StandardMaterial>);

/// Scene entity for every surface the mapper has reported.
#[derive(Resource, Debug, Default)]
pub struct EnvironmentRegistry {
    surfaces: HashMap<SurfaceId, Entity>,
}

impl EnvironmentRegistry {
    pub fn get(&self, id: &SurfaceId) -> Option<Entity> {
        self.surfaces.get(id).copied()
    }

    /// Returns true the first time an id is registered.
    pub fn register(&mut self, id: SurfaceId, entity: Entity) -> bool {
        self.surfaces.insert(id, entity).is_none()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

fn setup(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    commands.insert_resource(SpatialMaterial(materials.add(StandardMaterial {
        base_color: Color::srgba(0.3, 0.8, 1.0, 0.25),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        ..default()
    })));
}

fn surface_transform(surface: &SpatialSurface) -> Transform {
    Transform::from_translation(surface.bounds_center).with_rotation(surface.bounds_rotation)
}

fn surface_added_or_updated(
    mut commands: Commands,
    mut events: EventReader<SurfaceAddedOrUpdated>,
    mut registry: ResMut<EnvironmentRegistry>,
    mut meshes: ResMut<Assets<Mesh>>,
    material: Res<SpatialMaterial>,
    mut surfaces: Query<(&mut Transform, &mut Mesh3d), With<EnvironmentSurface>>,
) {
    for SurfaceAddedOrUpdated(surface) in events.read() {
        if let Some(entity) = registry.get(&surface.id) {
            let Ok((mut transform, mut mesh)) = surfaces.get_mut(entity) else {
                debug!("Surface {} is not spawned yet, dropping update", surface.id);
                continue;
            };
            *transform = surface_transform(surface);
            mesh.0 = meshes.add(surface.mesh.clone());
            // TODO: rebuild the trimesh collider from the refined mesh
            debug!("Updated surface {}", surface.id);
            continue;
        }

        let Some(collider) = Collider::trimesh_from_mesh(&surface.mesh) else {
            error!("Surface {} has no usable triangles", surface.id);
            continue;
        };

        let entity = commands
            .spawn((
                Name::new(format!("Surface {}", surface.id)),
                EnvironmentSurface(surface.id.clone()),
                Mesh3d(meshes.add(surface.mesh.clone())),
                MeshMaterial3d(material.0.clone()),
                surface_transform(surface),
                RigidBody::Static,
                collider,
                Friction::new(0.5),
                CollisionLayers::new(GameLayer::Environment, GameLayer::Ball),
            ))
            .id();

        registry.register(surface.id.clone(), entity);
        info!("Added surface {} ({} known)", surface.id, registry.len());
    }
}
