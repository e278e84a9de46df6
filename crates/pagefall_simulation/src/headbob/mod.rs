//! Camera headbob effect
//!
//! Висит на camera entity (child игрока). Читает флаги владельца
//! (`moving`, `grounded`, `crouching`) и качает локальную позицию камеры.
//! MovementController переключает пресеты через `set_normal/set_crouch/set_sprint`.

use bevy::prelude::*;

use crate::player::PlayerController;
use crate::SimulationSet;

/// Скорость возврата камеры в rest position (1/сек)
pub const HEADBOB_RETURN_RATE: f32 = 10.0;

/// Параметры одного режима: амплитуда, частота, сглаживание
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct HeadbobParams {
    pub amount: f32,
    pub frequency: f32,
    pub smooth: f32,
}

impl HeadbobParams {
    pub const fn new(amount: f32, frequency: f32, smooth: f32) -> Self {
        Self {
            amount,
            frequency,
            smooth,
        }
    }
}

/// Пресеты по режимам движения (normal / crouch / sprint)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct HeadbobPresets {
    pub normal: HeadbobParams,
    pub crouch: HeadbobParams,
    pub sprint: HeadbobParams,
}

impl Default for HeadbobPresets {
    fn default() -> Self {
        Self {
            normal: HeadbobParams::new(0.04, 15.0, 15.0),
            crouch: HeadbobParams::new(0.04, 10.0, 15.0),
            sprint: HeadbobParams::new(0.06, 20.0, 20.0),
        }
    }
}

/// Headbob компонент (camera entity)
///
/// `params` заменяются целиком при смене режима, частично не мутируются.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HeadbobEffect {
    /// Игрок, чьи флаги читаем
    pub owner: Entity,
    /// Rest position камеры (локальная), фиксируется при spawn
    pub rest_position: Vec3,
    pub presets: HeadbobPresets,
    params: HeadbobParams,
}

impl HeadbobEffect {
    pub fn new(owner: Entity, rest_position: Vec3, presets: HeadbobPresets) -> Self {
        Self {
            owner,
            rest_position,
            presets,
            params: presets.normal,
        }
    }

    pub fn set_normal(&mut self) {
        self.params = self.presets.normal;
    }

    pub fn set_crouch(&mut self) {
        self.params = self.presets.crouch;
    }

    pub fn set_sprint(&mut self) {
        self.params = self.presets.sprint;
    }

    pub fn params(&self) -> HeadbobParams {
        self.params
    }

    /// Смещение за этот frame (добавляется к текущей позиции, не к rest)
    ///
    /// y = sin(t·f)·a·1.4, x = cos(t·f/2)·a·1.6, оба умножены на clamp01(smooth·dt).
    pub fn bob_delta(&self, elapsed: f32, delta: f32) -> Vec3 {
        let HeadbobParams {
            amount,
            frequency,
            smooth,
        } = self.params;
        let blend = (smooth * delta).clamp(0.0, 1.0);

        Vec3::new(
            (elapsed * frequency / 2.0).cos() * amount * 1.6 * blend,
            (elapsed * frequency).sin() * amount * 1.4 * blend,
            0.0,
        )
    }
}

/// Headbob Plugin (SimulationSet::Camera: после crouch/FOV переходов)
pub struct HeadbobPlugin;

impl Plugin for HeadbobPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_headbob.in_set(SimulationSet::Camera));
    }
}

/// System: headbob + возврат в rest position
///
/// 1. moving && grounded → translation += bob_delta (накопительно, не от rest)
/// 2. translation != rest && !crouching → lerp к rest с rate 10/сек
pub fn apply_headbob(
    mut cameras: Query<(&mut Transform, &HeadbobEffect)>,
    players: Query<&PlayerController>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();
    let elapsed = time.elapsed_secs();

    for (mut transform, effect) in cameras.iter_mut() {
        let Ok(owner) = players.get(effect.owner) else {
            continue;
        };

        if owner.moving && owner.grounded {
            transform.translation += effect.bob_delta(elapsed, delta);
        }

        if transform.translation != effect.rest_position && !owner.crouching {
            let t = (HEADBOB_RETURN_RATE * delta).clamp(0.0, 1.0);
            transform.translation = transform.translation.lerp(effect.rest_position, t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect() -> HeadbobEffect {
        HeadbobEffect::new(
            Entity::PLACEHOLDER,
            Vec3::new(0.0, 0.53, 0.0),
            HeadbobPresets::default(),
        )
    }

    #[test]
    fn test_presets_swap_wholesale() {
        let mut effect = effect();
        assert_eq!(effect.params(), HeadbobPresets::default().normal);

        effect.set_sprint();
        assert_eq!(effect.params(), HeadbobParams::new(0.06, 20.0, 20.0));

        effect.set_crouch();
        assert_eq!(effect.params(), HeadbobParams::new(0.04, 10.0, 15.0));

        effect.set_normal();
        assert_eq!(effect.params(), HeadbobParams::new(0.04, 15.0, 15.0));
    }

    #[test]
    fn test_bob_delta_at_time_zero() {
        let effect = effect();
        // t = 0: sin(0) = 0, cos(0) = 1; blend = clamp01(15 · 1/60) = 0.25
        let delta = effect.bob_delta(0.0, 1.0 / 60.0);
        assert!((delta.x - 0.04 * 1.6 * 0.25).abs() < 1e-6, "x = {}", delta.x);
        assert!(delta.y.abs() < 1e-6);
        assert_eq!(delta.z, 0.0);
    }

    #[test]
    fn test_bob_delta_blend_saturates() {
        let effect = effect();
        // Огромный dt → blend clamp до 1.0, амплитуда не растёт дальше a·1.6
        let delta = effect.bob_delta(0.0, 10.0);
        assert!((delta.x - 0.04 * 1.6).abs() < 1e-6);
    }
}
