//! Pagefall Simulation Core
//!
//! ECS-логика на Bevy 0.16: first-person контроллер, headbob, stage manager, scene switch.
//!
//! Collaborators (physics, rendering, audio, UI, input) живут снаружи и общаются
//! только через компоненты/ресурсы/события:
//! - ECS = правила (скорости, переходы, счётчик страниц, веса профилей)
//! - Client/Rapier = sweep-move, ray cast, камера, звук, текст

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod headbob;
pub mod logger;
pub mod physics;
pub mod player;
pub mod scene;
pub mod stage;
pub mod transition;

// Re-export базовых типов для удобства
pub use headbob::{HeadbobEffect, HeadbobParams, HeadbobPlugin, HeadbobPresets};
pub use logger::{LogLevel, LogPrinter, LOGGER_LEVEL};
pub use physics::{HeadlessMotorPlugin, RapierBridgePlugin};
pub use player::{
    spawn_player, CameraLens, FootstepPlayed, InteractPrompt, LookTarget, Pickable, Player,
    PlayerCamera, PlayerController, PlayerInput, PlayerPlugin, PlayerTuning,
};
pub use scene::{CurrentScene, SceneLoaded, ScenePlugin, SceneSwitchRequest};
pub use stage::{
    AllPagesCollected, MoodProfile, MoodVolume, PageCollected, SpeedTier, SpeedTierReached,
    StageConfig, StageManager, StagePlugin,
};

/// Порядок подсистем внутри одного Update
///
/// Input → Player → Physics → Camera → Stage → Feedback → Scene → Cleanup
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Collaborators → ECS (input, ground contact, look ray)
    Input,
    /// Move → Look → Crouch → Sprint → Footsteps → Interaction → переходы
    Player,
    /// Sweep-move запросы → physics
    Physics,
    /// Headbob
    Camera,
    /// StageManager: страницы, crossfade
    Stage,
    /// Stage → player (speed tiers)
    Feedback,
    Scene,
    /// Сброс одноразового input
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Physics collaborator НЕ включён: client добавляет `RapierBridgePlugin`,
/// headless: `HeadlessMotorPlugin`.
#[derive(Default)]
pub struct SimulationPlugin {
    pub stage: StageConfig,
}

impl SimulationPlugin {
    pub fn new(stage: StageConfig) -> Self {
        Self { stage }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        logger::init_logger();

        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Player,
                SimulationSet::Physics,
                SimulationSet::Camera,
                SimulationSet::Stage,
                SimulationSet::Feedback,
                SimulationSet::Scene,
                SimulationSet::Cleanup,
            )
                .chain(),
        );

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_plugins((
            PlayerPlugin,
            HeadbobPlugin,
            StagePlugin::new(self.stage.clone()),
            ScenePlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Frame time headless симуляции (60 Hz)
pub const HEADLESS_FRAME_TIME: f32 = 1.0 / 60.0;

/// Создаёт minimal Bevy App для headless симуляции
///
/// Frame time фиксирован (`TimeUpdateStrategy::ManualDuration`), поэтому
/// одинаковый seed + одинаковый input дают одинаковый мир.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            HEADLESS_FRAME_TIME,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
