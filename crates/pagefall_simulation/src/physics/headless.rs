//! Headless motor: physics stub без Rapier
//!
//! Для headless binary и интеграционных тестов: sweep-move запросы применяются
//! к Transform напрямую, пол: плоскость y = floor_height.

use bevy::prelude::*;

use crate::player::{CharacterMotor, GroundContact};
use crate::SimulationSet;

pub struct HeadlessMotorPlugin {
    pub floor_height: f32,
}

impl Default for HeadlessMotorPlugin {
    fn default() -> Self {
        Self { floor_height: 0.0 }
    }
}

/// Высота пола для headless stub'а
#[derive(Resource, Debug, Clone, Copy)]
pub struct HeadlessFloor(pub f32);

impl Plugin for HeadlessMotorPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HeadlessFloor(self.floor_height))
            .add_systems(
                Update,
                integrate_motor_headless.in_set(SimulationSet::Physics),
            );
    }
}

/// translation += pending; ниже пола → на пол, grounded
pub fn integrate_motor_headless(
    mut query: Query<(&mut CharacterMotor, &mut Transform, &mut GroundContact)>,
    floor: Res<HeadlessFloor>,
) {
    for (mut motor, mut transform, mut contact) in query.iter_mut() {
        transform.translation += motor.take();

        if transform.translation.y <= floor.0 {
            transform.translation.y = floor.0;
            contact.grounded = true;
        } else {
            contact.grounded = false;
        }
    }
}
