//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через input.

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Camera systems используют `Without<Player>` filter, чтобы `&mut Transform`
/// игрока и камеры не конфликтовали в одной системе.
///
/// # Single-player
/// Обычно только один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker для camera entity игрока (child)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerCamera;
