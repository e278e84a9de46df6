//! Player systems (Update, строго по порядку)
//!
//! ```text
//! refresh_grounded → player_move → player_look → player_crouch → player_sprint
//!     → player_footsteps → player_interaction → tick_player_transitions
//! ```
//!
//! Камера: отдельный entity (child игрока). Queries камеры используют
//! `Without<Player>`, чтобы не конфликтовать с `&mut Transform` игрока.

use bevy::prelude::*;
use rand::Rng;

use crate::headbob::HeadbobEffect;
use crate::logger;
use crate::stage::{PageCollected, SpeedTierReached};
use crate::transition::{Countdown, Tween};
use crate::DeterministicRng;

use super::components::*;
use super::events::FootstepPlayed;
use super::player::{Player, PlayerCamera};
use super::tuning::PlayerTuning;

/// (a) grounded из physics collaborator
pub fn refresh_grounded(mut players: Query<(&mut PlayerController, &GroundContact), With<Player>>) {
    for (mut controller, contact) in players.iter_mut() {
        controller.grounded = contact.grounded;
    }
}

/// (b) Move: горизонтальный sweep в локальном right/forward, прыжок, гравитация, вертикальный sweep
pub fn player_move(
    mut players: Query<
        (
            &mut PlayerController,
            &Transform,
            &PlayerInput,
            &PlayerTuning,
            &mut CharacterMotor,
        ),
        With<Player>,
    >,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut controller, transform, input, tuning, mut motor) in players.iter_mut() {
        // Прижимаем к полу, иначе скорость падения копится пока стоим
        if controller.grounded && controller.vertical_velocity < 0.0 {
            controller.vertical_velocity = tuning.grounded_velocity;
        }

        let x = input.axes.x;
        let z = input.axes.y;
        let direction = transform.right().as_vec3() * x + transform.forward().as_vec3() * z;
        motor.request_move(direction * controller.move_speed * delta);

        controller.moving = x != 0.0 || z != 0.0;

        if input.jump_pressed && controller.grounded {
            controller.vertical_velocity = tuning.jump_velocity();
        }

        controller.vertical_velocity += tuning.gravity * delta;
        motor.request_move(Vec3::Y * controller.vertical_velocity * delta);
    }
}

/// (b') Look: pitch камеры (clamp ±90°), yaw тела без clamp
pub fn player_look(
    mut players: Query<
        (&mut PlayerController, &mut Transform, &PlayerInput, &PlayerTuning),
        With<Player>,
    >,
    mut cameras: Query<&mut Transform, (With<PlayerCamera>, Without<Player>)>,
) {
    for (mut controller, mut transform, input, tuning) in players.iter_mut() {
        let yaw = controller.apply_look(input.mouse_delta, tuning.mouse_sensitivity);

        if let Ok(mut camera_transform) = cameras.get_mut(controller.camera) {
            // Положительный pitch = взгляд вниз; в Bevy +X rotation поднимает -Z forward
            camera_transform.rotation = Quat::from_rotation_x(-controller.pitch.to_radians());
        }

        // Положительный yaw = поворот вправо (по часовой, если смотреть сверху)
        if yaw != 0.0 {
            transform.rotate_y(-yaw.to_radians());
        }
    }
}

/// (c) Crouch: press/release edges, только если не sprint
///
/// Новый crouch переход заменяет in-flight (максимум один).
pub fn player_crouch(
    mut players: Query<
        (
            &mut PlayerController,
            &PlayerInput,
            &PlayerTuning,
            &mut PlayerTransitions,
            &mut CharacterHeight,
        ),
        With<Player>,
    >,
    mut cameras: Query<(&Transform, &mut HeadbobEffect), Without<Player>>,
) {
    for (mut controller, input, tuning, mut transitions, mut height) in players.iter_mut() {
        if !controller.can_crouch() {
            continue;
        }
        let Ok((camera_transform, mut headbob)) = cameras.get_mut(controller.camera) else {
            continue;
        };

        if input.crouch_pressed {
            transitions.camera_offset = Some(Tween::new(
                camera_transform.translation,
                tuning.crouched_camera_offset,
                tuning.transition_duration,
            ));
            height.0 = tuning.crouched_height;
            controller.enter_crouch(tuning);
            headbob.set_crouch();
        } else if input.crouch_released {
            transitions.camera_offset = Some(Tween::new(
                camera_transform.translation,
                tuning.standing_camera_offset,
                tuning.transition_duration,
            ));
            height.0 = tuning.standing_height;
            controller.exit_crouch(tuning);
            headbob.set_normal();
        }
    }
}

/// (d) Sprint: только если не crouch и sprint разблокирован (State4)
///
/// Новый FOV переход заменяет in-flight (максимум один).
pub fn player_sprint(
    mut players: Query<
        (
            &mut PlayerController,
            &PlayerInput,
            &PlayerTuning,
            &mut PlayerTransitions,
        ),
        With<Player>,
    >,
    mut cameras: Query<(&CameraLens, &mut HeadbobEffect), Without<Player>>,
) {
    for (mut controller, input, tuning, mut transitions) in players.iter_mut() {
        if !controller.can_sprint() {
            continue;
        }
        let Ok((lens, mut headbob)) = cameras.get_mut(controller.camera) else {
            continue;
        };

        if input.sprint_pressed && controller.moving {
            transitions.fov = Some(Tween::new(
                lens.fov_degrees,
                tuning.sprint_fov,
                tuning.transition_duration,
            ));
            controller.enter_sprint(tuning);
            headbob.set_sprint();
        } else if input.sprint_released {
            transitions.fov = Some(Tween::new(
                lens.fov_degrees,
                tuning.normal_fov,
                tuning.transition_duration,
            ));
            controller.exit_sprint(tuning);
            headbob.set_normal();
        }
    }
}

/// (e) Footsteps: один отложенный trigger за раз, pitch из DeterministicRng
pub fn player_footsteps(
    mut players: Query<
        (
            Entity,
            &PlayerController,
            &PlayerTuning,
            &mut PlayerTransitions,
            &mut FootstepEmitter,
        ),
        With<Player>,
    >,
    mut rng: ResMut<DeterministicRng>,
    mut footsteps: EventWriter<FootstepPlayed>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, controller, tuning, mut transitions, mut emitter) in players.iter_mut() {
        emitter.tick(delta);

        if !tuning.features.footsteps {
            continue;
        }

        match transitions.footstep.as_mut().map(|countdown| countdown.tick(delta)) {
            Some(true) => {
                transitions.footstep = None;
                let pitch = rng
                    .rng
                    .gen_range(tuning.footstep_pitch_min..=tuning.footstep_pitch_max);
                emitter.play();
                footsteps.write(FootstepPlayed { entity, pitch });
            }
            Some(false) => {}
            None => {
                if controller.grounded && controller.moving && !emitter.is_playing() {
                    let delay = if controller.crouching {
                        tuning.crouched_footstep_delay
                    } else {
                        tuning.footstep_delay
                    };
                    transitions.footstep = Some(Countdown::new(delay));
                }
            }
        }
    }
}

/// (f) Interaction: look target → prompt → pickup → PageCollected
pub fn player_interaction(
    mut commands: Commands,
    players: Query<(&PlayerInput, &PlayerTuning, &LookTarget), With<Player>>,
    pickables: Query<(), With<Pickable>>,
    mut prompt: ResMut<InteractPrompt>,
    mut collected: EventWriter<PageCollected>,
) {
    for (input, tuning, target) in players.iter() {
        if !tuning.features.interaction {
            continue;
        }

        match target.0 {
            Some(page) if pickables.contains(page) => {
                prompt.show(&tuning.interact_prompt);

                if input.interact_pressed {
                    commands.entity(page).despawn();
                    prompt.hide();
                    collected.write(PageCollected { page });
                }
            }
            _ => prompt.hide(),
        }
    }
}

/// Тик crouch offset / FOV переходов; завершённый переход удаляется
pub fn tick_player_transitions(
    mut players: Query<(&PlayerController, &mut PlayerTransitions), With<Player>>,
    mut cameras: Query<(&mut Transform, &mut CameraLens), Without<Player>>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (controller, mut transitions) in players.iter_mut() {
        let Ok((mut camera_transform, mut lens)) = cameras.get_mut(controller.camera) else {
            continue;
        };
        let transitions = &mut *transitions;

        if let Some(tween) = &mut transitions.camera_offset {
            camera_transform.translation = tween.step(delta);
            if tween.is_finished() {
                transitions.camera_offset = None;
            }
        }

        if let Some(tween) = &mut transitions.fov {
            lens.fov_degrees = tween.step(delta);
            if tween.is_finished() {
                transitions.fov = None;
            }
        }
    }
}

/// Stage → player: постоянные speed tiers
pub fn apply_speed_tiers(
    mut tiers: EventReader<SpeedTierReached>,
    mut players: Query<(&mut PlayerController, &PlayerTuning), With<Player>>,
) {
    for event in tiers.read() {
        for (mut controller, tuning) in players.iter_mut() {
            controller.apply_speed_tier(event.tier, tuning);
            logger::log_info(&format!(
                "Speed tier {} → walk speed {:.1}{}",
                event.tier.label(),
                controller.walk_speed,
                if controller.sprint_locked { "" } else { " (sprint unlocked)" }
            ));
        }
    }
}

/// Конец frame: сбросить edges и mouse delta
pub fn consume_player_input(mut inputs: Query<&mut PlayerInput, With<Player>>) {
    for mut input in inputs.iter_mut() {
        input.consume_frame();
    }
}
