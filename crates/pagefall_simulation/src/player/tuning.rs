//! Player tuning: все настраиваемые числа контроллера
//!
//! Два набора (release / prototype) расходятся только в tier deltas и feature toggles,
//! см. `PlayerTuning::release()` и `PlayerTuning::prototype()`.

use bevy::prelude::*;

use crate::headbob::HeadbobPresets;
use crate::stage::SpeedTier;

/// Прибавки к walk speed за каждый speed tier (постоянные, накопительные)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierSpeedDeltas {
    pub state2: f32,
    pub state3: f32,
    pub state4: f32,
}

impl TierSpeedDeltas {
    pub fn for_tier(&self, tier: SpeedTier) -> f32 {
        match tier {
            SpeedTier::State2 => self.state2,
            SpeedTier::State3 => self.state3,
            SpeedTier::State4 => self.state4,
        }
    }
}

/// Какие подсистемы контроллера включены
///
/// Prototype-конфигурация была без look ray interaction и footstep audio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerFeatures {
    pub interaction: bool,
    pub footsteps: bool,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerTuning {
    // Movement
    pub walk_speed: f32,
    pub sprint_speed_delta: f32,
    pub crouch_speed_delta: f32,
    pub jump_height: f32,
    pub gravity: f32,
    /// Вертикальная скорость, к которой прижимаемся на земле (держит controller у пола)
    pub grounded_velocity: f32,

    // Look
    pub mouse_sensitivity: f32,
    pub normal_fov: f32,
    pub sprint_fov: f32,

    // Crouch
    pub standing_camera_offset: Vec3,
    pub crouched_camera_offset: Vec3,
    pub standing_height: f32,
    pub crouched_height: f32,
    pub collider_radius: f32,

    /// Длительность crouch/FOV переходов (сек)
    pub transition_duration: f32,

    // Footsteps
    pub footstep_delay: f32,
    pub crouched_footstep_delay: f32,
    pub footstep_pitch_min: f32,
    pub footstep_pitch_max: f32,

    // Interaction
    pub look_distance: f32,
    pub interact_prompt: String,

    pub tier_speed_deltas: TierSpeedDeltas,
    pub headbob: HeadbobPresets,
    pub features: PlayerFeatures,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self::release()
    }
}

impl PlayerTuning {
    pub fn release() -> Self {
        Self {
            walk_speed: 6.0,
            sprint_speed_delta: 4.0,
            crouch_speed_delta: -4.0,
            jump_height: 1.2,
            gravity: -9.8,
            grounded_velocity: -2.0,

            mouse_sensitivity: 2.5,
            normal_fov: 60.0,
            sprint_fov: 67.0,

            standing_camera_offset: Vec3::new(0.0, 0.53, 0.0),
            crouched_camera_offset: Vec3::new(0.0, 0.25, 0.0),
            standing_height: 2.0,
            crouched_height: 1.0,
            collider_radius: 0.5,

            transition_duration: 0.2,

            footstep_delay: 0.08,
            crouched_footstep_delay: 0.15,
            footstep_pitch_min: 0.8,
            footstep_pitch_max: 1.1,

            look_distance: 5.0,
            interact_prompt: "Press E to pick up".to_string(),

            tier_speed_deltas: TierSpeedDeltas {
                state2: 2.0,
                state3: -4.0,
                state4: 2.0,
            },
            headbob: HeadbobPresets::default(),
            features: PlayerFeatures {
                interaction: true,
                footsteps: true,
            },
        }
    }

    /// Ранняя конфигурация: ровные +2 за tier, без interaction и шагов
    pub fn prototype() -> Self {
        Self {
            tier_speed_deltas: TierSpeedDeltas {
                state2: 2.0,
                state3: 2.0,
                state4: 2.0,
            },
            features: PlayerFeatures {
                interaction: false,
                footsteps: false,
            },
            ..Self::release()
        }
    }

    /// v = sqrt(h · -2 · g)
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_defaults() {
        let tuning = PlayerTuning::default();
        assert_eq!(tuning.walk_speed, 6.0);
        assert_eq!(tuning.sprint_speed_delta, 4.0);
        assert_eq!(tuning.crouch_speed_delta, -4.0);
        assert_eq!(tuning.normal_fov, 60.0);
        assert_eq!(tuning.sprint_fov, 67.0);
        assert!(tuning.features.interaction);
    }

    #[test]
    fn test_jump_velocity() {
        let tuning = PlayerTuning::default();
        // sqrt(1.2 · 2 · 9.8) = sqrt(23.52) ≈ 4.85
        assert!((tuning.jump_velocity() - 23.52_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_prototype_keeps_movement_numbers() {
        let prototype = PlayerTuning::prototype();
        assert_eq!(prototype.walk_speed, PlayerTuning::release().walk_speed);
        assert_eq!(prototype.tier_speed_deltas.for_tier(SpeedTier::State3), 2.0);
        assert!(!prototype.features.interaction);
        assert!(!prototype.features.footsteps);
    }
}
