use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use pagefall_simulation::scene::{FOREST_SCENE, MAIN_MENU_SCENE};
use pagefall_simulation::{
    CurrentScene, Player, PlayerInput, SceneLoaded, SceneSwitchRequest, SimulationSet,
};

/// Пиксели мыши → axis units (как Mouse X / Mouse Y)
const MOUSE_AXIS_SCALE: f32 = 0.1;

pub struct InputCapturePlugin;

impl Plugin for InputCapturePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (capture_player_input, scene_hotkeys)
                .chain()
                .in_set(SimulationSet::Input),
        )
        .add_systems(Update, grab_cursor_on_scene_load);
    }
}

/// Keyboard + mouse → PlayerInput
///
/// Edges копятся через `|=`: сбрасывает их simulation (consume_player_input).
fn capture_player_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut players: Query<&mut PlayerInput, With<Player>>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();

    let Ok(mut input) = players.single_mut() else {
        return;
    };

    input.axes = Vec2::new(
        axis(&keys, KeyCode::KeyA, KeyCode::KeyD),
        axis(&keys, KeyCode::KeyS, KeyCode::KeyW),
    );
    // Экран: y вниз, PlayerInput: y вверх
    input.mouse_delta += Vec2::new(mouse_delta.x, -mouse_delta.y) * MOUSE_AXIS_SCALE;

    input.jump_pressed |= keys.just_pressed(KeyCode::Space);
    input.crouch_pressed |= keys.just_pressed(KeyCode::ControlLeft);
    input.crouch_released |= keys.just_released(KeyCode::ControlLeft);
    input.sprint_pressed |= keys.just_pressed(KeyCode::ShiftLeft);
    input.sprint_released |= keys.just_released(KeyCode::ShiftLeft);
    input.interact_pressed |= keys.just_pressed(KeyCode::KeyE);
}

fn axis(keys: &ButtonInput<KeyCode>, negative: KeyCode, positive: KeyCode) -> f32 {
    let mut value = 0.0;
    if keys.pressed(negative) {
        value -= 1.0;
    }
    if keys.pressed(positive) {
        value += 1.0;
    }
    value
}

/// Escape: выход. Enter в меню: старт леса
fn scene_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    current: Res<CurrentScene>,
    mut requests: EventWriter<SceneSwitchRequest>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        requests.write(SceneSwitchRequest::Quit);
    } else if keys.just_pressed(KeyCode::Enter) && current.0 == MAIN_MENU_SCENE {
        requests.write(SceneSwitchRequest::Load(FOREST_SCENE.to_string()));
    }
}

/// Лес: курсор захвачен и скрыт, меню: свободен
fn grab_cursor_on_scene_load(
    mut loaded: EventReader<SceneLoaded>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Some(scene) = loaded.read().last() else {
        return;
    };
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    let in_game = scene.name == FOREST_SCENE;
    window.cursor_options.grab_mode = if in_game {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    window.cursor_options.visible = !in_game;
}
