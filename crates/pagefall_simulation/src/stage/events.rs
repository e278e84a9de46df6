//! Stage events

use bevy::prelude::*;

/// Speed tier, достигнутый по порогу страниц
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedTier {
    State2,
    State3,
    State4,
}

impl SpeedTier {
    pub const ALL: [SpeedTier; 3] = [SpeedTier::State2, SpeedTier::State3, SpeedTier::State4];

    pub fn label(&self) -> &'static str {
        match self {
            SpeedTier::State2 => "State2",
            SpeedTier::State3 => "State3",
            SpeedTier::State4 => "State4",
        }
    }
}

/// Event: игрок подобрал страницу
///
/// Генерируется: player_interaction (E на Pickable)
/// Обрабатывается: collect_pages → StageManager::collect_page
#[derive(Event, Debug, Clone, Copy)]
pub struct PageCollected {
    /// Уже despawn'нутая страница (для логов)
    pub page: Entity,
}

/// Event: счётчик страниц впервые достиг порога speed tier
///
/// Обрабатывается: apply_speed_tiers (PlayerController::apply_speed_tier)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedTierReached {
    pub tier: SpeedTier,
}

/// Event: собраны все страницы (финальный порог), one-shot
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllPagesCollected {
    pub collected: u32,
}
