use bevy::color::palettes::css::GOLD;
use bevy::prelude::*;

use crate::gameplay::gauge::{GaugeDirection, GaugeState};
use crate::gameplay::score::ScoreTracker;
use crate::gameplay::session::{GameSession, Placement};
use crate::gameplay::surface::SurfaceStatus;
use crate::gameplay::{LaunchState, ScoredEvent};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup).add_systems(
            Update,
            (
                update_gauge.run_if(in_state(LaunchState::Ready)),
                update_score,
            ),
        );
    }
}

#[derive(Component)]
struct GaugeText;

#[derive(Component)]
struct ScoreText;

fn setup(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(12.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("Scanning room..."),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                TextLayout::new_with_justify(JustifyText::Center),
                GaugeText,
            ));

            parent.spawn((
                Text::new(score_label(0)),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(GOLD.into()),
                TextLayout::new_with_justify(JustifyText::Center),
                ScoreText,
            ));
        });
}

fn gauge_label(session: &GameSession) -> String {
    match session.placement() {
        Placement::Searching => match session.surface() {
            SurfaceStatus::Valid => "Valid Location\nTap to start game!!".to_owned(),
            SurfaceStatus::Invalid => "Move bucket!!".to_owned(),
            SurfaceStatus::NoSurface => "Look at a table or the floor".to_owned(),
        },
        Placement::Placed => match session.gauge().state() {
            GaugeState::Idle => "Tap to charge your throw".to_owned(),
            GaugeState::Charging => {
                let arrow = match session.gauge().direction() {
                    GaugeDirection::Increasing => '+',
                    GaugeDirection::Decreasing => '-',
                };
                format!("Throw gauge: {:.2} {arrow}", session.gauge().value())
            }
        },
    }
}

fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

fn update_gauge(mut gauge_query: Query<&mut Text, With<GaugeText>>, session: Res<GameSession>) {
    let label = gauge_label(&session);
    for mut text in &mut gauge_query {
        if text.0 != label {
            text.0.clone_from(&label);
        }
    }
}

fn update_score(
    mut score_query: Query<&mut Text, With<ScoreText>>,
    mut scored_event: EventReader<ScoredEvent>,
    tracker: Res<ScoreTracker>,
) {
    for _ in scored_event.read() {
        for mut text in &mut score_query {
            text.0 = score_label(tracker.score());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::gauge::PowerGauge;

    fn session() -> GameSession {
        GameSession::new(PowerGauge::new(15.0, 0.05))
    }

    #[test]
    fn test_searching_labels_follow_surface() {
        let mut session = session();
        session.observe_surface(SurfaceStatus::Invalid);
        assert_eq!(gauge_label(&session), "Move bucket!!", "invalid spot");

        session.observe_surface(SurfaceStatus::Valid);
        assert_eq!(
            gauge_label(&session),
            "Valid Location\nTap to start game!!",
            "valid spot"
        );
    }

    #[test]
    fn test_charging_label_shows_power() {
        let mut session = session();
        session.observe_surface(SurfaceStatus::Valid);
        session.tap();
        assert_eq!(gauge_label(&session), "Tap to charge your throw", "idle");

        session.tap();
        for _ in 0..20 {
            session.frame();
        }
        assert_eq!(gauge_label(&session), "Throw gauge: 1.00 +", "20 frames");
    }

    #[test]
    fn test_score_label() {
        assert_eq!(score_label(7), "Score: 7", "score text");
    }
}
