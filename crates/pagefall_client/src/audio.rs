use std::time::Duration;

use bevy::audio::{PlaybackMode, Pitch, Volume};
use bevy::prelude::*;
use pagefall_simulation::player::FootstepEmitter;
use pagefall_simulation::FootstepPlayed;

/// Базовая частота "шага" (процедурный тон, без asset файлов)
const FOOTSTEP_FREQUENCY: f32 = 90.0;

pub struct FootstepAudioPlugin;

impl Plugin for FootstepAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_footstep_sound)
            .add_systems(Update, play_footsteps);
    }
}

#[derive(Resource)]
pub struct FootstepSound(pub Handle<Pitch>);

fn load_footstep_sound(mut commands: Commands, mut pitches: ResMut<Assets<Pitch>>) {
    // Длина тона = длина клипа, которую отсчитывает FootstepEmitter
    let clip = Duration::from_secs_f32(FootstepEmitter::default().clip_secs);
    commands.insert_resource(FootstepSound(
        pitches.add(Pitch::new(FOOTSTEP_FREQUENCY, clip)),
    ));
}

/// FootstepPlayed → one-shot AudioPlayer, pitch через playback speed
fn play_footsteps(
    mut commands: Commands,
    mut footsteps: EventReader<FootstepPlayed>,
    sound: Option<Res<FootstepSound>>,
) {
    let Some(sound) = sound else {
        footsteps.clear();
        return;
    };

    for footstep in footsteps.read() {
        commands.spawn((
            AudioPlayer(sound.0.clone()),
            PlaybackSettings {
                mode: PlaybackMode::Despawn,
                volume: Volume::Linear(0.4),
                ..default()
            }
            .with_speed(footstep.pitch),
        ));
    }
}
