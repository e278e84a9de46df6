//! StageManager: счётчик страниц, crossfade mood profiles, speed tiers
//!
//! Один экземпляр на App (resource), создаётся `StagePlugin`.
//! Мутируется только через `collect_page` и тик blend'а.

use bevy::prelude::*;

use crate::logger;
use crate::transition::{inverse_lerp, Tween};

use super::config::{MoodProfile, StageConfig};
use super::events::SpeedTier;

/// In-flight crossfade по цепочке профилей
///
/// Позиция `index + fraction` линейно идёт от текущей к целевой. Веса в каждом
/// кадре: `1 - fraction` у профиля `index`, `fraction` у `index + 1`, остальные 0.
/// Порог не обрывает crossfade: после одной страницы ни один вес не сдвигается
/// за кадр больше чем на `delta / transition_duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageBlend {
    tween: Tween<f32>,
}

impl StageBlend {
    /// Целевая позиция на цепочке профилей
    pub fn target(&self) -> f32 {
        self.tween.end
    }
}

/// Результат одного `collect_page`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageChange {
    pub collected: u32,
    /// Tier, чей порог достигнут именно этим вызовом
    pub tier: Option<SpeedTier>,
    /// true только на вызове, который впервые довёл счётчик до максимума
    pub completed: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct StageManager {
    collected: u32,
    thresholds: [u32; 4],
    transition_duration: f32,
    profiles: Vec<MoodProfile>,
    /// Параллельно `profiles`; сумма всегда 1
    weights: Vec<f32>,
    /// Текущая позиция `index + fraction`, из неё строятся `weights`
    position: f32,
    from_index: usize,
    to_index: usize,
    target_blend: f32,
    blend: Option<StageBlend>,
    completed: bool,
}

impl StageManager {
    pub fn new(config: &StageConfig) -> Self {
        let expected = config.thresholds.len() + 1;
        if config.profiles.len() != expected {
            logger::log_warning(&format!(
                "StageConfig: {} mood profiles, expected {} (crossfade indices will be clamped)",
                config.profiles.len(),
                expected
            ));
        }

        let mut weights = vec![0.0; config.profiles.len()];
        if let Some(first) = weights.first_mut() {
            *first = 1.0;
        }

        Self {
            collected: 0,
            thresholds: config.thresholds,
            transition_duration: config.transition_duration,
            profiles: config.profiles.clone(),
            weights,
            position: 0.0,
            from_index: 0,
            to_index: 1,
            target_blend: 0.0,
            blend: None,
            completed: false,
        }
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn max_pages(&self) -> u32 {
        self.thresholds[3]
    }

    pub fn profiles(&self) -> &[MoodProfile] {
        &self.profiles
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Текущая целевая пара (from, to)
    pub fn pair(&self) -> (usize, usize) {
        (self.from_index, self.to_index)
    }

    pub fn target_blend(&self) -> f32 {
        self.target_blend
    }

    /// Текущая позиция crossfade: 1.0 = профиль 1 полностью, 1.5 = половина 1 и 2
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn blend(&self) -> Option<&StageBlend> {
        self.blend.as_ref()
    }

    pub fn is_blending(&self) -> bool {
        self.blend.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Подобрана страница: счётчик, новый crossfade, tier/финал
    pub fn collect_page(&mut self) -> StageChange {
        let previous = self.collected;
        self.collected = (self.collected + 1).min(self.max_pages());

        self.retarget_blend();

        let mut change = StageChange {
            collected: self.collected,
            ..default()
        };

        // На clamp'е счётчик не меняется: повторно ничего не стреляем
        if self.collected != previous {
            change.tier = self.tier_at(self.collected);

            if self.collected == self.max_pages() && !self.completed {
                self.completed = true;
                change.completed = true;
            }
        }

        change
    }

    /// Speed tier, чей порог ровно равен `collected`
    pub fn tier_at(&self, collected: u32) -> Option<SpeedTier> {
        self.thresholds[..3]
            .iter()
            .zip(SpeedTier::ALL)
            .find(|(threshold, _)| **threshold == collected)
            .map(|(_, tier)| tier)
    }

    /// Пара соседних профилей и позиция внутри интервала порогов
    ///
    /// Интервалы [0, t1), [t1, t2), [t2, t3), [t3, t4]: нижняя граница включена,
    /// последний интервал закрыт. Ровно на пороге t_k → пара (k, k+1) с fraction 0.
    pub fn bracket(&self, collected: u32) -> (usize, usize, f32) {
        let bounds = [
            0,
            self.thresholds[0],
            self.thresholds[1],
            self.thresholds[2],
            self.thresholds[3],
        ];

        for k in 0..4 {
            if collected < bounds[k + 1] {
                let fraction =
                    inverse_lerp(bounds[k] as f32, bounds[k + 1] as f32, collected as f32);
                return (k, k + 1, fraction);
            }
        }

        (3, 4, 1.0)
    }

    /// Новый crossfade к текущему bracket, заменяет in-flight
    fn retarget_blend(&mut self) {
        let (from, to, fraction) = self.bracket(self.collected);
        self.from_index = from;
        self.to_index = to;
        self.target_blend = fraction;

        if self.weights.len() < 2 {
            return;
        }

        let last = (self.weights.len() - 1) as f32;
        let target = (from as f32 + fraction).min(last);

        self.blend = Some(StageBlend {
            tween: Tween::new(self.position, target, self.transition_duration),
        });
    }

    /// Один frame crossfade; по завершении коммитятся точные веса
    pub fn tick_blend(&mut self, delta: f32) {
        let Some(blend) = self.blend.as_mut() else {
            return;
        };

        self.position = blend.tween.step(delta);
        if blend.tween.is_finished() {
            self.blend = None;
        }

        apply_position(&mut self.weights, self.position);
    }

    /// Прогнать crossfade до конца (для тестов и headless отчётов)
    pub fn settle(&mut self) {
        while self.blend.is_some() {
            self.tick_blend(self.transition_duration.max(f32::EPSILON));
        }
    }
}

/// Позиция → пара соседних весов; целая позиция даёт один профиль полностью
fn apply_position(weights: &mut [f32], position: f32) {
    if weights.len() < 2 {
        return;
    }

    let last = weights.len() - 1;
    let position = position.clamp(0.0, last as f32);
    let from = (position.floor() as usize).min(last - 1);
    let fraction = position - from as f32;

    for (index, weight) in weights.iter_mut().enumerate() {
        *weight = if index == from {
            1.0 - fraction
        } else if index == from + 1 {
            fraction
        } else {
            0.0
        };
    }
}
