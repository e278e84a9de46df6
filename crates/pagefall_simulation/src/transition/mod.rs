//! Multi-frame transitions (tween/countdown state machines)
//!
//! Каждый переход: явная state machine, которую тикают раз в frame.
//! "Новый переход отменяет старый" = перезапись `Option<Tween<_>>` новым значением,
//! отдельного cancel API нет.

use bevy::prelude::*;

/// Значения, которые можно линейно интерполировать
pub trait Tweenable: Copy {
    fn interpolate(start: Self, end: Self, t: f32) -> Self;
}

impl Tweenable for f32 {
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Tweenable for Vec3 {
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

/// Линейный переход start → end за `duration` секунд
///
/// Семантика шага:
/// - пока `elapsed < duration`: значение = lerp(start, end, elapsed / duration),
///   затем elapsed += dt (первый шаг отдаёт ровно `start`)
/// - иначе: отдаём ровно `end` и помечаем переход завершённым
///
/// Финальное значение коммитится точно, без overshoot от накопленного frame time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T: Tweenable> {
    pub start: T,
    pub end: T,
    pub duration: f32,
    elapsed: f32,
    finished: bool,
}

impl<T: Tweenable> Tween<T> {
    pub fn new(start: T, end: T, duration: f32) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Один frame перехода, возвращает значение для этого frame
    pub fn step(&mut self, delta: f32) -> T {
        if self.elapsed < self.duration {
            let value = T::interpolate(self.start, self.end, self.elapsed / self.duration);
            self.elapsed += delta.max(0.0);
            value
        } else {
            self.finished = true;
            self.end
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Отложенный one-shot trigger (аналог "подождать N секунд, потом сделать")
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// true на том frame, когда время вышло
    pub fn tick(&mut self, delta: f32) -> bool {
        self.remaining -= delta.max(0.0);
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

/// Позиция value между a и b: 0 при value == a, 1 при value == b, clamp [0, 1]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}
