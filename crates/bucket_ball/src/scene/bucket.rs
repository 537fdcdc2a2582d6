use core::f32::consts::PI;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::gameplay::PlacedEvent;
use crate::gameplay::session::{GameSession, Placement};
use crate::gameplay::surface::SurfaceStatus;
use crate::player::HeadRig;
use crate::scene::GameLayer;
use crate::settings::GameSettings;

pub struct BucketPlugin;

impl Plugin for BucketPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Bucket>()
            .add_systems(Startup, setup)
            .add_systems(Update, finish_placement);
    }
}

#[derive(Component, Reflect, Default, Debug)]
#[reflect(Component)]
pub struct Bucket;

#[derive(Component)]
struct BucketBody;

/// Enlarged invisible region around the rim. A ball touching it is in.
#[derive(Component, Debug)]
pub struct DetectionVolume;

/// Sign floating over the bucket while the player picks a spot
#[derive(Component)]
pub struct PlacementMarker;

#[derive(Resource)]
pub struct BucketMaterials {
    preview: Handle<StandardMaterial>,
    wood: Handle<StandardMaterial>,
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<GameSettings>,
) {
    let preview = materials.add(StandardMaterial {
        base_color: settings.valid_color,
        unlit: true,
        ..default()
    });
    let wood = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.35, 0.18),
        perceptual_roughness: 0.9,
        ..default()
    });

    let radius = settings.bucket_radius;
    let height = settings.bucket_height;

    // Origin sits on the surface, the body stands on top of it
    commands
        .spawn((
            Name::new("Bucket"),
            Bucket,
            RigidBody::Static,
            Transform::default(),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                BucketBody,
                Mesh3d(meshes.add(Cylinder::new(radius, height))),
                MeshMaterial3d(preview.clone()),
                Transform::from_xyz(0.0, height / 2.0, 0.0),
                Collider::cylinder(radius, height),
                CollisionLayers::new(GameLayer::Bucket, GameLayer::Ball),
            ));

            parent.spawn((
                DetectionVolume,
                Transform::from_xyz(0.0, height, 0.0),
                Collider::sphere(radius * settings.detection_scale),
                Sensor,
                CollisionLayers::new(GameLayer::Bucket, GameLayer::Ball),
            ));

            parent.spawn((
                PlacementMarker,
                Mesh3d(meshes.add(Rectangle::new(radius * 2.0, radius))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::WHITE,
                    unlit: true,
                    cull_mode: None,
                    ..default()
                })),
                Transform::from_xyz(0.0, height + radius * 2.5, 0.0),
            ));
        });

    commands.insert_resource(BucketMaterials { preview, wood });
}

/// Casts the center-of-view ray, moves the bucket preview to the hit point
/// and tells the session whether the spot can hold the bucket.
pub fn probe_surface(
    spatial_query: SpatialQuery,
    settings: Res<GameSettings>,
    mut session: ResMut<GameSession>,
    head_query: Query<&GlobalTransform, With<HeadRig>>,
    mut bucket_query: Query<(&mut Transform, &mut Visibility), With<Bucket>>,
    mut marker_query: Query<&mut Transform, (With<PlacementMarker>, Without<Bucket>)>,
    bucket_materials: Res<BucketMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if session.placement() != Placement::Searching {
        return;
    }

    let Ok(head) = head_query.get_single() else {
        return;
    };
    let Ok((mut bucket_transform, mut visibility)) = bucket_query.get_single_mut() else {
        return;
    };

    let origin = head.translation();
    let direction = head.forward();
    let filter = SpatialQueryFilter::from_mask(GameLayer::Environment);

    let status = match spatial_query.cast_ray(
        origin,
        direction,
        settings.raycast_distance,
        true,
        &filter,
    ) {
        Some(hit) => {
            bucket_transform.translation = origin + *direction * hit.distance;
            *visibility = Visibility::Visible;
            SurfaceStatus::classify(hit.normal, settings.surface_angle_limit)
        }
        None => SurfaceStatus::NoSurface,
    };

    if status != session.surface() {
        debug!("Surface under view is now {status}");
    }
    session.observe_surface(status);

    if let Some(material) = materials.get_mut(&bucket_materials.preview) {
        material.base_color = settings.preview_color(status);
    }

    // Face the sign toward the viewer. The bucket itself never rotates.
    for mut marker in &mut marker_query {
        let marker_world = bucket_transform.translation + marker.translation;
        let target = marker.translation + (origin - marker_world);
        marker.look_at(target, Vec3::Y);
        marker.rotate_y(PI);
    }
}

fn finish_placement(
    mut placed_events: EventReader<PlacedEvent>,
    mut body_query: Query<&mut MeshMaterial3d<StandardMaterial>, With<BucketBody>>,
    mut marker_query: Query<&mut Visibility, With<PlacementMarker>>,
    bucket_materials: Res<BucketMaterials>,
) {
    if placed_events.is_empty() {
        return;
    }
    placed_events.clear();

    for mut material in &mut body_query {
        material.0 = bucket_materials.wood.clone();
    }
    for mut visibility in &mut marker_query {
        *visibility = Visibility::Hidden;
    }
}
