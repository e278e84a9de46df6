//! Player events

use bevy::prelude::*;

/// Event: шаг прозвучал (audio collaborator проигрывает звук с этим pitch)
///
/// Генерируется: player_footsteps (после задержки 0.08/0.15 сек)
/// Обрабатывается: client audio (AudioPlayer + PlaybackSettings::speed)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FootstepPlayed {
    pub entity: Entity,
    /// [0.8, 1.1] по умолчанию
    pub pitch: f32,
}
