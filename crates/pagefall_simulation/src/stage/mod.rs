//! Stage domain: мир реагирует на собранные страницы
//!
//! - StageManager (resource): счётчик, crossfade mood profiles, speed tiers
//! - StageConfig: release (6/10/15/20) и prototype (2/6/10/15)
//! - MoodVolume: веса профилей для rendering collaborator

use bevy::prelude::*;

pub mod config;
pub mod events;
pub mod manager;
pub mod systems;


pub use config::*;
pub use events::*;
pub use manager::*;
pub use systems::MoodVolume;

use crate::logger;
use crate::SimulationSet;

/// Stage Plugin
///
/// Создаёт StageManager ровно один раз. Если resource уже есть
/// (второй StagePlugin / повторная инициализация), новый отбрасывается.
///
/// Порядок (SimulationSet::Stage):
/// 1. collect_pages: PageCollected → счётчик, tiers, финал
/// 2. tick_stage_blend: crossfade
/// 3. sync_mood_volumes: веса → MoodVolume
#[derive(Default)]
pub struct StagePlugin {
    pub config: StageConfig,
}

impl StagePlugin {
    pub fn new(config: StageConfig) -> Self {
        Self { config }
    }
}

impl Plugin for StagePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PageCollected>()
            .add_event::<SpeedTierReached>()
            .add_event::<AllPagesCollected>();

        init_stage_manager(app.world_mut(), &self.config);

        app.add_systems(Startup, systems::spawn_mood_volumes);
        app.add_systems(
            Update,
            (
                systems::collect_pages,
                systems::tick_stage_blend,
                systems::sync_mood_volumes,
            )
                .chain()
                .in_set(SimulationSet::Stage),
        );
    }
}

/// Создать StageManager, если его ещё нет. false, уже существовал, новый отброшен.
pub fn init_stage_manager(world: &mut World, config: &StageConfig) -> bool {
    if world.contains_resource::<StageManager>() {
        logger::log_warning("StageManager already exists, discarding the new one");
        return false;
    }

    world.insert_resource(config.clone());
    world.insert_resource(StageManager::new(config));
    true
}
