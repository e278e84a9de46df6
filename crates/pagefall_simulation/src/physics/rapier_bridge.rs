//! Rapier bridge: physics collaborator для player controller
//!
//! ECS правила не знают про Rapier; этот модуль переводит:
//! - CharacterMotor (sweep-move запросы) → KinematicCharacterController::translation
//! - KinematicCharacterControllerOutput::grounded → GroundContact
//! - CharacterHeight → Collider::capsule_y
//! - look ray (ReadRapierContext::cast_ray) → LookTarget
//!
//! Требует RapierPhysicsPlugin (добавляет client). Headless режим использует HeadlessMotorPlugin.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::player::{
    CharacterHeight, CharacterMotor, GroundContact, LookTarget, Player, PlayerCamera,
    PlayerController, PlayerTuning,
};
use crate::logger;
use crate::SimulationSet;

use super::layers;

pub struct RapierBridgePlugin;

impl Plugin for RapierBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_character_physics,
                pull_ground_contact,
                cast_look_ray,
            )
                .chain()
                .in_set(SimulationSet::Input),
        );
        app.add_systems(
            Update,
            (sync_collider_height, push_motor_to_rapier)
                .chain()
                .in_set(SimulationSet::Physics),
        );
    }
}

/// Capsule по полной высоте: half_height цилиндрической части + radius
pub fn character_collider(height: f32, radius: f32) -> Collider {
    let half_height = (height / 2.0 - radius).max(0.0);
    Collider::capsule_y(half_height, radius)
}

/// Новый игрок → kinematic body + capsule + character controller
pub fn attach_character_physics(
    mut commands: Commands,
    players: Query<(Entity, &CharacterHeight, &PlayerTuning), Added<CharacterHeight>>,
) {
    for (entity, height, tuning) in players.iter() {
        commands.entity(entity).insert((
            RigidBody::KinematicPositionBased,
            character_collider(height.0, tuning.collider_radius),
            KinematicCharacterController {
                snap_to_ground: Some(CharacterLength::Absolute(0.2)),
                // Страницы (sensor, interactable) не блокируют движение
                filter_groups: Some(layers::player_groups()),
                ..default()
            },
            layers::player_groups(),
        ));
        logger::log(&format!(
            "Character physics attached to {:?} (layer {}, height {:.1})",
            entity,
            layers::group_name(layers::PLAYER_GROUP),
            height.0
        ));
    }
}

/// Output прошлого physics step → GroundContact
pub fn pull_ground_contact(
    mut players: Query<(&KinematicCharacterControllerOutput, &mut GroundContact)>,
) {
    for (output, mut contact) in players.iter_mut() {
        contact.grounded = output.grounded;
    }
}

/// Ray из камеры вперёд на look_distance, только interactable layer
pub fn cast_look_ray(
    rapier_context: ReadRapierContext,
    mut players: Query<(Entity, &PlayerController, &PlayerTuning, &mut LookTarget), With<Player>>,
    cameras: Query<&GlobalTransform, With<PlayerCamera>>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (player, controller, tuning, mut target) in players.iter_mut() {
        let Ok(camera) = cameras.get(controller.camera) else {
            target.0 = None;
            continue;
        };

        let filter = QueryFilter::default()
            .groups(layers::interaction_ray_groups())
            .exclude_collider(player);

        let hit = context.cast_ray(
            camera.translation(),
            camera.forward().as_vec3(),
            tuning.look_distance,
            true,
            filter,
        );

        target.0 = hit.map(|(entity, _toi)| entity);
    }
}

/// Crouch/stand → пересобрать capsule
pub fn sync_collider_height(
    mut players: Query<(&CharacterHeight, &PlayerTuning, &mut Collider), Changed<CharacterHeight>>,
) {
    for (height, tuning, mut collider) in players.iter_mut() {
        *collider = character_collider(height.0, tuning.collider_radius);
    }
}

/// Оба sweep-move запроса frame'а одной translation (Rapier двигает раз за step)
pub fn push_motor_to_rapier(
    mut players: Query<(&mut CharacterMotor, &mut KinematicCharacterController)>,
) {
    for (mut motor, mut controller) in players.iter_mut() {
        controller.translation = Some(motor.take());
    }
}
