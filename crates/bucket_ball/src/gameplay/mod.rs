pub mod gauge;
pub mod score;
pub mod session;
pub mod surface;

use ar_helpers::input::GestureEvent;
use ar_helpers::spatial::{SpatialMappingStarted, StartSpatialMapping};
use ar_helpers::speech::{Speak, SpeechFinished};
use avian3d::prelude::*;
use bevy::ecs::schedule::SystemConfigs;
use bevy::prelude::*;
use strum::Display;

use crate::player::HeadRig;
use crate::player::controls::recognize_gestures;
use crate::projectile::{Ball, ProjectilePool, ThrowBall};
use crate::scene::bucket::{DetectionVolume, probe_surface};
use crate::settings::GameSettings;
use gauge::PowerGauge;
use score::ScoreTracker;
use session::{GameSession, TapOutcome};

const WELCOME_LINE: &str = "Welcome to Bucket Ball game!";

/// Startup runs these phases in order before the frame loop starts.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Display)]
pub enum LaunchState {
    #[default]
    StartingSpatialMapping,
    Announcing,
    Ready,
}

#[derive(Event)]
pub struct PlacedEvent;

#[derive(Event)]
pub struct ThrownEvent {
    pub power: f32,
}

#[derive(Event)]
pub struct ScoredEvent;

pub struct StateTransitionPlugin;

impl Plugin for StateTransitionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GameSettings>()
            .init_resource::<GameSettings>()
            .init_resource::<ScoreTracker>()
            .init_state::<LaunchState>()
            .add_event::<PlacedEvent>()
            .add_event::<ThrownEvent>()
            .add_event::<ScoredEvent>()
            .add_systems(Startup, setup)
            .add_systems(
                OnEnter(LaunchState::StartingSpatialMapping),
                start_spatial_mapping,
            )
            .add_systems(OnEnter(LaunchState::Announcing), announce)
            .add_systems(OnEnter(LaunchState::Ready), ready)
            .add_systems(
                Update,
                (
                    await_spatial_mapping.run_if(in_state(LaunchState::StartingSpatialMapping)),
                    await_welcome_line.run_if(in_state(LaunchState::Announcing)),
                    (recognize_gestures, probe_surface, play_round())
                        .chain()
                        .run_if(in_state(LaunchState::Ready)),
                ),
            );
    }
}

/// Balls already in flight are resolved before a new throw can recycle one.
fn play_round() -> SystemConfigs {
    (detect_goals, remove_lost_balls, handle_gestures, charge_gauge).chain()
}

fn setup(mut commands: Commands, settings: Res<GameSettings>) {
    commands.insert_resource(GameSession::new(PowerGauge::new(
        settings.max_power,
        settings.power_step,
    )));
}

fn start_spatial_mapping(mut requests: EventWriter<StartSpatialMapping>) {
    info!("Launch phase {}", LaunchState::StartingSpatialMapping);
    requests.send(StartSpatialMapping);
}

fn await_spatial_mapping(
    mut replies: EventReader<SpatialMappingStarted>,
    mut next_state: ResMut<NextState<LaunchState>>,
) {
    for SpatialMappingStarted(result) in replies.read() {
        if let Err(err) = result {
            warn!("Continuing without spatial mapping: {err}");
        }
        next_state.set(LaunchState::Announcing);
    }
}

fn announce(mut lines: EventWriter<Speak>) {
    info!("Launch phase {}", LaunchState::Announcing);
    lines.send(Speak(WELCOME_LINE.to_owned()));
}

fn await_welcome_line(
    mut finished: EventReader<SpeechFinished>,
    mut next_state: ResMut<NextState<LaunchState>>,
) {
    if finished.read().any(|SpeechFinished(line)| line == WELCOME_LINE) {
        next_state.set(LaunchState::Ready);
    }
}

fn ready() {
    info!("Ready");
}

fn handle_gestures(
    mut commands: Commands,
    mut gestures: EventReader<GestureEvent>,
    mut session: ResMut<GameSession>,
    mut tracker: ResMut<ScoreTracker>,
    head_query: Query<&GlobalTransform, With<HeadRig>>,
    mut placed_event: EventWriter<PlacedEvent>,
    mut thrown_event: EventWriter<ThrownEvent>,
) {
    let head = head_query
        .get_single()
        .ok()
        .map(GlobalTransform::to_scale_rotation_translation);

    for gesture in gestures.read() {
        if *gesture == GestureEvent::DoubleTapped {
            debug!("Double tap");
            continue;
        }

        // Keep the charge running until there is a pose to throw from
        if head.is_none() && session.throws_on_tap() {
            error!("No head pose to throw from");
            continue;
        }

        match session.tap() {
            TapOutcome::Ignored => {}
            TapOutcome::Placed => {
                info!("Bucket placed");
                placed_event.send(PlacedEvent);
            }
            TapOutcome::ChargingStarted => info!("Charging throw"),
            TapOutcome::Throw { power } => {
                let Some((_, rotation, position)) = head else {
                    continue;
                };
                info!("Throwing with power {power:.2}");
                tracker.begin_throw();
                commands.queue(ThrowBall {
                    position,
                    rotation,
                    power,
                });
                thrown_event.send(ThrownEvent { power });
            }
        }
    }
}

fn charge_gauge(mut session: ResMut<GameSession>) {
    session.frame();
}

fn detect_goals(
    mut commands: Commands,
    mut collision_event_reader: EventReader<CollisionStarted>,
    volume_query: Query<(), With<DetectionVolume>>,
    ball_query: Query<(), With<Ball>>,
    mut tracker: ResMut<ScoreTracker>,
    mut pool: ResMut<ProjectilePool>,
    mut scored_event: EventWriter<ScoredEvent>,
) {
    let mut removed: Vec<Entity> = Vec::new();

    for CollisionStarted(first, second) in collision_event_reader.read() {
        let ball = if volume_query.contains(*first) && ball_query.contains(*second) {
            *second
        } else if volume_query.contains(*second) && ball_query.contains(*first) {
            *first
        } else {
            continue;
        };

        if removed.contains(&ball) {
            continue;
        }
        removed.push(ball);

        debug!("Collision with {ball}");
        commands.entity(ball).despawn_recursive();
        pool.forget(ball);

        if tracker.register_goal() {
            info!("Score: {}", tracker.score());
            scored_event.send(ScoredEvent);
        }
    }
}

fn remove_lost_balls(
    mut commands: Commands,
    ball_query: Query<(Entity, &GlobalTransform), With<Ball>>,
    mut pool: ResMut<ProjectilePool>,
    settings: Res<GameSettings>,
) {
    for (ball, transform) in &ball_query {
        if transform.translation().y < settings.kill_plane_y {
            debug!("Ball {ball} fell out of the room");
            commands.entity(ball).despawn_recursive();
            pool.forget(ball);
        }
    }
}
