//! Player компоненты: состояние контроллера, input, переходы, мосты к физике/аудио

use bevy::prelude::*;

use crate::stage::SpeedTier;
use crate::transition::{Countdown, Tween};

use super::tuning::PlayerTuning;

/// Pitch камеры ограничен ±90°
pub const PITCH_LIMIT_DEGREES: f32 = 90.0;

/// Состояние movement контроллера игрока (мутируется каждый frame)
///
/// Инвариант: `move_speed = walk_speed + модификатор активного режима`,
/// crouching и sprinting не бывают true одновременно.
/// `walk_speed` уже включает все применённые speed tiers.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    /// Camera entity (child игрока)
    pub camera: Entity,

    pub vertical_velocity: f32,
    pub grounded: bool,
    pub moving: bool,
    pub crouching: bool,
    pub sprinting: bool,
    /// Sprint разблокируется только на State4
    pub sprint_locked: bool,

    pub walk_speed: f32,
    pub move_speed: f32,

    /// Pitch камеры (градусы), [-90, 90]
    pub pitch: f32,
}

impl PlayerController {
    pub fn new(camera: Entity, tuning: &PlayerTuning) -> Self {
        Self {
            camera,
            vertical_velocity: 0.0,
            grounded: false,
            moving: false,
            crouching: false,
            sprinting: false,
            sprint_locked: true,
            walk_speed: tuning.walk_speed,
            move_speed: tuning.walk_speed,
            pitch: 0.0,
        }
    }

    /// Пересчёт move_speed из walk_speed + активного модификатора
    pub fn recompute_move_speed(&mut self, tuning: &PlayerTuning) {
        let modifier = if self.crouching {
            tuning.crouch_speed_delta
        } else if self.sprinting {
            tuning.sprint_speed_delta
        } else {
            0.0
        };
        self.move_speed = self.walk_speed + modifier;
    }

    pub fn enter_crouch(&mut self, tuning: &PlayerTuning) {
        self.crouching = true;
        self.sprinting = false;
        self.recompute_move_speed(tuning);
    }

    pub fn exit_crouch(&mut self, tuning: &PlayerTuning) {
        self.crouching = false;
        self.recompute_move_speed(tuning);
    }

    pub fn enter_sprint(&mut self, tuning: &PlayerTuning) {
        self.sprinting = true;
        self.crouching = false;
        self.recompute_move_speed(tuning);
    }

    pub fn exit_sprint(&mut self, tuning: &PlayerTuning) {
        self.sprinting = false;
        self.recompute_move_speed(tuning);
    }

    /// Постоянная прибавка к walk speed; State4 ещё и открывает sprint
    pub fn apply_speed_tier(&mut self, tier: SpeedTier, tuning: &PlayerTuning) {
        self.walk_speed += tuning.tier_speed_deltas.for_tier(tier);
        if tier == SpeedTier::State4 {
            self.sprint_locked = false;
        }
        self.recompute_move_speed(tuning);
    }

    /// Mouse look: pitch накапливается и клампится, yaw возвращается как есть (градусы)
    pub fn apply_look(&mut self, mouse_delta: Vec2, sensitivity: f32) -> f32 {
        let yaw = mouse_delta.x * sensitivity;
        self.pitch -= mouse_delta.y * sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        yaw
    }

    pub fn can_crouch(&self) -> bool {
        !self.sprinting
    }

    pub fn can_sprint(&self) -> bool {
        !self.crouching && !self.sprint_locked
    }
}

/// Input за текущий frame
///
/// Заполняется client'ом (keyboard/mouse) или тестами напрямую.
/// Edges и mouse delta сбрасываются в конце frame (`consume_frame`), оси держатся.
///
/// # Axes
/// - `axes.x`: -1 (влево) → +1 (вправо)
/// - `axes.y`: -1 (назад) → +1 (вперёд)
///
/// # Mouse
/// `mouse_delta` в axis units (уже масштабирован client'ом), `y` положительный = вверх.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    pub axes: Vec2,
    pub mouse_delta: Vec2,
    pub jump_pressed: bool,
    pub crouch_pressed: bool,
    pub crouch_released: bool,
    pub sprint_pressed: bool,
    pub sprint_released: bool,
    pub interact_pressed: bool,
}

impl PlayerInput {
    pub fn consume_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.jump_pressed = false;
        self.crouch_pressed = false;
        self.crouch_released = false;
        self.sprint_pressed = false;
        self.sprint_released = false;
        self.interact_pressed = false;
    }
}

/// In-flight переходы игрока: максимум один на каждый вид
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerTransitions {
    /// Локальная позиция камеры (crouch/stand)
    pub camera_offset: Option<Tween<Vec3>>,
    /// Field of view (sprint)
    pub fov: Option<Tween<f32>>,
    /// Отложенный шаг
    pub footstep: Option<Countdown>,
}

/// Sweep-move запросы за frame
///
/// Контроллер кладёт сюда displacement (горизонталь + вертикаль отдельными запросами),
/// physics bridge забирает и обнуляет.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CharacterMotor {
    pending: Vec3,
    requests: u32,
}

impl CharacterMotor {
    pub fn request_move(&mut self, displacement: Vec3) {
        self.pending += displacement;
        self.requests += 1;
    }

    pub fn pending(&self) -> Vec3 {
        self.pending
    }

    pub fn requests(&self) -> u32 {
        self.requests
    }

    pub fn take(&mut self) -> Vec3 {
        let displacement = self.pending;
        self.pending = Vec3::ZERO;
        self.requests = 0;
        displacement
    }
}

/// Высота collider'а (physics bridge пересобирает capsule при изменении)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CharacterHeight(pub f32);

/// Ground contact от physics (Rapier output или headless stub)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct GroundContact {
    pub grounded: bool,
}

/// Источник звука шагов
///
/// `remaining`: сколько ещё играет текущий звук (> 0 значит "играет").
#[derive(Component, Debug, Clone, Copy)]
pub struct FootstepEmitter {
    pub clip_secs: f32,
    pub remaining: f32,
}

impl Default for FootstepEmitter {
    fn default() -> Self {
        Self {
            clip_secs: 0.35,
            remaining: 0.0,
        }
    }
}

impl FootstepEmitter {
    pub fn is_playing(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn play(&mut self) {
        self.remaining = self.clip_secs;
    }

    pub fn tick(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta).max(0.0);
    }
}

/// Entity под прицелом (пересчитывается каждый frame look ray'ем)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LookTarget(pub Option<Entity>);

/// Тег "можно подобрать" (страницы)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Pickable;

/// Объектив камеры: field of view в градусах
///
/// Client синхронизирует в `Projection::Perspective`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CameraLens {
    pub fov_degrees: f32,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self { fov_degrees: 60.0 }
    }
}

/// UI prompt "Press E to pick up" (resource, client рисует Text)
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct InteractPrompt {
    pub visible: bool,
    pub text: String,
}

impl InteractPrompt {
    pub fn show(&mut self, text: &str) {
        self.visible = true;
        if self.text != text {
            self.text = text.to_string();
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}
