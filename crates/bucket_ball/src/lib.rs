#![allow(clippy::type_complexity)]

mod audio;
mod gameplay;
mod player;
mod projectile;
mod scene;
mod settings;
mod ui;

use avian3d::prelude::*;

pub fn run() {
    ar_helpers::get_default_app(env!("CARGO_PKG_NAME"))
        .add_plugins(PhysicsPlugins::default())
        // .add_plugins(PhysicsDebugPlugin::default()) // Activate when you need to debug physics
        .add_plugins(gameplay::StateTransitionPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(scene::ScenePlugin)
        .add_plugins(projectile::ProjectilePlugin)
        .add_plugins(ui::UiPlugin)
        .add_plugins(audio::GameAudioPlugin)
        .run();
}
