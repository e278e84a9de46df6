//! Player domain: first-person movement controller
//!
//! Содержит:
//! - PlayerController (состояние: скорость, флаги, pitch)
//! - PlayerTuning (все числа контроллера, release/prototype)
//! - PlayerInput (input за frame)
//! - Переходы crouch offset / FOV / footstep (state machines)
//! - Interaction (look ray) → PageCollected
//! - Speed tiers от StageManager

use bevy::prelude::*;

pub mod components;
pub mod events;
#[allow(clippy::module_inception)]
pub mod player;
pub mod spawn;
pub mod systems;
pub mod tuning;

#[cfg(test)]
mod systems_tests;

pub use components::*;
pub use events::*;
pub use player::*;
pub use spawn::spawn_player;
pub use tuning::*;

use crate::SimulationSet;

/// Player Plugin
///
/// Порядок внутри frame фиксирован:
/// 1. refresh_grounded: ground contact от physics
/// 2. player_move: sweep-move запросы, прыжок, гравитация
/// 3. player_look: pitch/yaw
/// 4. player_crouch, player_sprint: переходы режимов
/// 5. player_footsteps: отложенный шаг
/// 6. player_interaction: look target → pickup
/// 7. tick_player_transitions: crouch offset / FOV
///
/// apply_speed_tiers: после StageManager (SimulationSet::Feedback),
/// consume_player_input: в самом конце frame.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FootstepPlayed>()
            .init_resource::<InteractPrompt>();

        app.add_systems(
            Update,
            (
                systems::refresh_grounded,
                systems::player_move,
                systems::player_look,
                systems::player_crouch,
                systems::player_sprint,
                systems::player_footsteps,
                systems::player_interaction,
                systems::tick_player_transitions,
            )
                .chain()
                .in_set(SimulationSet::Player),
        );

        app.add_systems(
            Update,
            systems::apply_speed_tiers.in_set(SimulationSet::Feedback),
        );
        app.add_systems(
            Update,
            systems::consume_player_input.in_set(SimulationSet::Cleanup),
        );
    }
}
