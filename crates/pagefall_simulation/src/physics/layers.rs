//! Collision groups: centralised constants
//!
//! - Group 1: Player (kinematic character)
//! - Group 2: Environment (земля, стены)
//! - Group 3: Interactable (страницы, sensor colliders)
//!
//! Rapier проверяет группы в обе стороны: (a.memberships & b.filter) && (b.memberships & a.filter).
//! Поэтому у страниц filter = ALL, а у игрока filter не включает Interactable,
//! look ray видит страницы, character controller сквозь них проходит.

use bevy_rapier3d::prelude::{CollisionGroups, Group};

pub const PLAYER_GROUP: Group = Group::GROUP_1;
pub const ENVIRONMENT_GROUP: Group = Group::GROUP_2;
pub const INTERACTABLE_GROUP: Group = Group::GROUP_3;

/// Player: коллайдит только с environment
pub fn player_groups() -> CollisionGroups {
    CollisionGroups::new(PLAYER_GROUP, ENVIRONMENT_GROUP)
}

pub fn environment_groups() -> CollisionGroups {
    CollisionGroups::new(ENVIRONMENT_GROUP, Group::ALL)
}

pub fn interactable_groups() -> CollisionGroups {
    CollisionGroups::new(INTERACTABLE_GROUP, Group::ALL)
}

/// Группы для look ray: попадаем только в interactable layer
pub fn interaction_ray_groups() -> CollisionGroups {
    CollisionGroups::new(Group::ALL, INTERACTABLE_GROUP)
}

/// Название группы для debug логов
pub fn group_name(group: Group) -> &'static str {
    if group == PLAYER_GROUP {
        "Player"
    } else if group == ENVIRONMENT_GROUP {
        "Environment"
    } else if group == INTERACTABLE_GROUP {
        "Interactable"
    } else {
        "Unknown"
    }
}
