use core::time::Duration;

use bevy::prelude::*;

/// Asks the host to speak a line. [`SpeechFinished`] follows once it has been
/// delivered.
#[derive(Event, Debug, Clone)]
pub struct Speak(pub String);

#[derive(Event, Debug, Clone)]
pub struct SpeechFinished(pub String);

#[derive(Reflect, Resource, Debug, Clone)]
#[reflect(Resource)]
pub struct SpeechSettings {
    pub words_per_minute: f32,
    pub min_duration: Duration,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            words_per_minute: 150.0,
            min_duration: Duration::from_secs(1),
        }
    }
}

impl SpeechSettings {
    /// How long the line takes to say
    pub fn utterance_duration(&self, line: &str) -> Duration {
        let words = line.split_whitespace().count() as f32;
        let spoken = Duration::from_secs_f32(words * 60.0 / self.words_per_minute.max(1.0));
        spoken.max(self.min_duration)
    }
}

// Desktop hosts have no voice, the line is shown as a caption instead
#[derive(Component)]
struct Caption {
    line: String,
    timer: Timer,
}

pub struct SpeechPlugin;

impl Plugin for SpeechPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SpeechSettings>()
            .init_resource::<SpeechSettings>()
            .add_event::<Speak>()
            .add_event::<SpeechFinished>()
            .add_systems(Update, (speak, finish_captions).chain());
    }
}

fn speak(mut commands: Commands, mut lines: EventReader<Speak>, settings: Res<SpeechSettings>) {
    for Speak(line) in lines.read() {
        info!("Speaking: {line}");

        commands.spawn((
            Text::new(line.clone()),
            TextFont {
                font_size: 28.0,
                ..default()
            },
            TextColor(Color::WHITE),
            TextLayout::new_with_justify(JustifyText::Center),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Percent(10.0),
                width: Val::Percent(100.0),
                ..default()
            },
            Caption {
                line: line.clone(),
                timer: Timer::new(settings.utterance_duration(line), TimerMode::Once),
            },
        ));
    }
}

fn finish_captions(
    mut commands: Commands,
    time: Res<Time>,
    mut captions: Query<(Entity, &mut Caption, &mut TextColor)>,
    mut finished: EventWriter<SpeechFinished>,
) {
    for (entity, mut caption, mut color) in &mut captions {
        caption.timer.tick(time.delta());

        // Fade over the last half of the line
        let alpha = (2.0 * (1.0 - caption.timer.fraction())).min(1.0);
        color.0 = Color::srgba(1.0, 1.0, 1.0, alpha);

        if caption.timer.finished() {
            commands.entity(entity).despawn();
            finished.send(SpeechFinished(caption.line.clone()));
        }
    }
}
