use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use pagefall_simulation::{RapierBridgePlugin, SimulationPlugin, StageConfig};

mod audio;
mod camera;
mod input;
mod level;
mod logging;
mod rendering;
mod ui;

use audio::FootstepAudioPlugin;
use camera::CameraPlugin;
use input::InputCapturePlugin;
use level::LevelPlugin;
use rendering::MoodRenderingPlugin;
use ui::UiPlugin;

fn main() {
    logging::install();

    App::new()
        // Bevy defaults (rendering, input, audio, window)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Pagefall".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics (kinematic character controller, ray casts)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Simulation (ECS rules) + Rapier collaborator
        .add_plugins(SimulationPlugin::new(StageConfig::release()))
        .add_plugins(RapierBridgePlugin)
        // Client collaborators
        .add_plugins((
            InputCapturePlugin,
            CameraPlugin,
            MoodRenderingPlugin,
            FootstepAudioPlugin,
            UiPlugin,
            LevelPlugin,
        ))
        .run();
}
