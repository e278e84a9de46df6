//! Spawn helper для игрока + камеры

use bevy::prelude::*;

use crate::headbob::HeadbobEffect;

use super::components::*;
use super::player::{Player, PlayerCamera};
use super::tuning::PlayerTuning;

/// Создаёт игрока с полным набором компонентов и camera child
///
/// - Player entity: Transform, PlayerController, PlayerInput, переходы, motor, ground contact, шаги
/// - Camera entity: PlayerCamera, CameraLens (normal FOV), HeadbobEffect (rest = standing offset)
///
/// Physics (Rapier collider/controller) добавляет `RapierBridgePlugin` на `Added<CharacterHeight>`,
/// headless режим обходится без него.
pub fn spawn_player(commands: &mut Commands, position: Vec3, tuning: PlayerTuning) -> Entity {
    let player = commands.spawn_empty().id();

    let camera = commands
        .spawn((
            PlayerCamera,
            Transform::from_translation(tuning.standing_camera_offset),
            CameraLens {
                fov_degrees: tuning.normal_fov,
            },
            HeadbobEffect::new(player, tuning.standing_camera_offset, tuning.headbob),
        ))
        .id();

    commands.entity(player).insert((
        Player,
        Transform::from_translation(position),
        PlayerController::new(camera, &tuning),
        PlayerInput::default(),
        PlayerTransitions::default(),
        CharacterMotor::default(),
        CharacterHeight(tuning.standing_height),
        GroundContact::default(),
        FootstepEmitter::default(),
        LookTarget::default(),
        tuning,
    ));
    commands.entity(player).add_child(camera);

    player
}
