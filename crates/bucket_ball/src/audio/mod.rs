use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::gameplay::{ScoredEvent, ThrownEvent};
use crate::settings::GameSettings;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
enum AssetState {
    #[default]
    Loading,
    Loaded,
}

#[derive(AssetCollection, Resource)]
struct AudioAssets {
    #[asset(path = "audio/bamboo-swing.ogg")]
    swing: Handle<bevy_kira_audio::prelude::AudioSource>,
    #[asset(path = "audio/okay.ogg")]
    goal: Handle<bevy_kira_audio::prelude::AudioSource>,
}

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .init_state::<AssetState>()
            .add_loading_state(
                LoadingState::new(AssetState::Loading)
                    .continue_to_state(AssetState::Loaded)
                    .load_collection::<AudioAssets>(),
            )
            .add_systems(
                Update,
                (throw_audio, score_audio).run_if(in_state(AssetState::Loaded)),
            );
    }
}

fn throw_audio(
    audio_assets: Res<AudioAssets>,
    audio: Res<Audio>,
    settings: Res<GameSettings>,
    mut thrown_event: EventReader<ThrownEvent>,
) {
    for ThrownEvent { power } in thrown_event.read() {
        // Harder throws swing louder
        let strength = (power / settings.max_power).clamp(0.0, 1.0);
        let gain = settings.sfx_gain * 0.5f32.mul_add(strength, 0.5);
        audio
            .play(audio_assets.swing.clone_weak())
            .with_volume(f64::from(gain));
    }
}

fn score_audio(
    audio_assets: Res<AudioAssets>,
    audio: Res<Audio>,
    settings: Res<GameSettings>,
    mut scored_event: EventReader<ScoredEvent>,
) {
    for _ in scored_event.read() {
        audio
            .play(audio_assets.goal.clone_weak())
            .with_volume(f64::from(settings.sfx_gain));
    }
}
