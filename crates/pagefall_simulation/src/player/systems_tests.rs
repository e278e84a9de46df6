//! Tests for player controller (логика + системы на headless App)

use bevy::prelude::*;

use crate::headbob::{HeadbobEffect, HEADBOB_RETURN_RATE};
use crate::physics::HeadlessMotorPlugin;
use crate::stage::{SpeedTier, SpeedTierReached, StageManager};
use crate::{create_headless_app, SimulationPlugin, HEADLESS_FRAME_TIME};

use super::components::*;
use super::events::FootstepPlayed;
use super::spawn::spawn_player;
use super::tuning::PlayerTuning;

// ============================================================================
// Helpers
// ============================================================================

#[derive(Resource, Default)]
struct CollectedFootsteps(Vec<FootstepPlayed>);

fn record_footsteps(mut events: EventReader<FootstepPlayed>, mut log: ResMut<CollectedFootsteps>) {
    log.0.extend(events.read().copied());
}

fn test_app(tuning: PlayerTuning) -> (App, Entity) {
    let mut app = create_headless_app(7);
    app.add_plugins((SimulationPlugin::default(), HeadlessMotorPlugin::default()))
        .init_resource::<CollectedFootsteps>()
        .add_systems(Last, record_footsteps);

    let player = spawn_player(&mut app.world_mut().commands(), Vec3::ZERO, tuning);
    app.world_mut().flush();

    // Первый frame с delta = 0, второй: уже на земле
    app.update();
    app.update();

    (app, player)
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn input(app: &mut App, player: Entity) -> Mut<'_, PlayerInput> {
    app.world_mut()
        .get_mut::<PlayerInput>(player)
        .expect("player has PlayerInput")
}

fn controller(app: &App, player: Entity) -> PlayerController {
    app.world()
        .get::<PlayerController>(player)
        .expect("player has PlayerController")
        .clone()
}

fn camera_translation(app: &App, player: Entity) -> Vec3 {
    let camera = controller(app, player).camera;
    app.world()
        .get::<Transform>(camera)
        .expect("camera has Transform")
        .translation
}

fn camera_fov(app: &App, player: Entity) -> f32 {
    let camera = controller(app, player).camera;
    app.world()
        .get::<CameraLens>(camera)
        .expect("camera has CameraLens")
        .fov_degrees
}

fn headbob(app: &App, player: Entity) -> HeadbobEffect {
    let camera = controller(app, player).camera;
    *app.world()
        .get::<HeadbobEffect>(camera)
        .expect("camera has HeadbobEffect")
}

fn set_camera_translation(app: &mut App, player: Entity, translation: Vec3) {
    let camera = controller(app, player).camera;
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(camera) {
        transform.translation = translation;
    }
}

fn look_at(app: &mut App, player: Entity, target: Entity) {
    if let Some(mut look) = app.world_mut().get_mut::<LookTarget>(player) {
        look.0 = Some(target);
    }
}

fn reach_tier(app: &mut App, tier: SpeedTier) {
    app.world_mut().send_event(SpeedTierReached { tier });
    app.update();
}

// ============================================================================
// Pure logic
// ============================================================================

#[test]
fn test_move_speed_modifier_sequence() {
    let tuning = PlayerTuning::release();
    let mut controller = PlayerController::new(Entity::PLACEHOLDER, &tuning);
    assert_eq!(controller.move_speed, 6.0);

    controller.enter_crouch(&tuning);
    assert_eq!(controller.move_speed, 2.0);

    controller.exit_crouch(&tuning);
    assert_eq!(controller.move_speed, 6.0);

    controller.apply_speed_tier(SpeedTier::State2, &tuning);
    assert_eq!(controller.move_speed, 8.0);

    controller.enter_sprint(&tuning);
    assert_eq!(controller.move_speed, 12.0);
    assert!(!controller.crouching);
}

#[test]
fn test_speed_tier_keeps_active_modifier() {
    let tuning = PlayerTuning::release();
    let mut controller = PlayerController::new(Entity::PLACEHOLDER, &tuning);

    controller.enter_crouch(&tuning);
    controller.apply_speed_tier(SpeedTier::State2, &tuning);

    // walk 8, crouch -4
    assert_eq!(controller.walk_speed, 8.0);
    assert_eq!(controller.move_speed, 4.0);
}

#[test]
fn test_tiers_are_cumulative_and_unlock_sprint() {
    let tuning = PlayerTuning::release();
    let mut controller = PlayerController::new(Entity::PLACEHOLDER, &tuning);

    controller.apply_speed_tier(SpeedTier::State2, &tuning);
    controller.apply_speed_tier(SpeedTier::State3, &tuning);
    assert!(controller.sprint_locked);
    assert_eq!(controller.walk_speed, 4.0);

    controller.apply_speed_tier(SpeedTier::State4, &tuning);
    assert!(!controller.sprint_locked);
    assert_eq!(controller.walk_speed, 6.0);
}

#[test]
fn test_pitch_always_clamped() {
    let tuning = PlayerTuning::release();
    let mut controller = PlayerController::new(Entity::PLACEHOLDER, &tuning);

    let deltas = [-1000.0, -37.5, -1.0, 0.0, 0.3, 12.0, 90.0, 5000.0];
    for y in deltas {
        for x in deltas {
            controller.apply_look(Vec2::new(x, y), tuning.mouse_sensitivity);
            assert!(
                (-90.0..=90.0).contains(&controller.pitch),
                "pitch = {}",
                controller.pitch
            );
        }
    }
}

#[test]
fn test_yaw_is_not_clamped() {
    let tuning = PlayerTuning::release();
    let mut controller = PlayerController::new(Entity::PLACEHOLDER, &tuning);

    let yaw = controller.apply_look(Vec2::new(400.0, 0.0), tuning.mouse_sensitivity);
    assert_eq!(yaw, 1000.0);
    assert_eq!(controller.pitch, 0.0);
}

// ============================================================================
// Systems
// ============================================================================

#[test]
fn test_player_lands_and_is_grounded() {
    let (app, player) = test_app(PlayerTuning::release());

    let state = controller(&app, player);
    assert!(state.grounded);
    assert!(!state.moving);
}

#[test]
fn test_forward_input_moves_along_local_forward() {
    let (mut app, player) = test_app(PlayerTuning::release());

    input(&mut app, player).axes = Vec2::new(0.0, 1.0);
    run_frames(&mut app, 60);

    let transform = app.world().get::<Transform>(player).copied().unwrap_or_default();
    // Bevy forward = -Z; 1 сек при 6 m/s
    assert!(transform.translation.z < -5.5, "z = {}", transform.translation.z);
    assert!(transform.translation.x.abs() < 1e-3);
    assert!(controller(&app, player).moving);
}

#[test]
fn test_move_issues_horizontal_and_vertical_sweeps() {
    // Без physics collaborator запросы копятся в CharacterMotor
    let mut app = create_headless_app(7);
    app.add_plugins(SimulationPlugin::default());
    let player = spawn_player(
        &mut app.world_mut().commands(),
        Vec3::ZERO,
        PlayerTuning::release(),
    );
    app.world_mut().flush();
    app.update();

    let motor = |app: &App| {
        app.world()
            .get::<CharacterMotor>(player)
            .copied()
            .unwrap_or_default()
    };
    let before = motor(&app);

    input(&mut app, player).axes = Vec2::new(0.0, 1.0);
    app.update();
    let after = motor(&app);

    assert_eq!(after.requests() - before.requests(), 2);
    let step = after.pending() - before.pending();
    assert!((step.z + 6.0 * HEADLESS_FRAME_TIME).abs() < 1e-5, "step = {:?}", step);
    // В воздухе: гравитация тянет вниз
    assert!(step.y < 0.0);
}

#[test]
fn test_jump_only_when_grounded() {
    let (mut app, player) = test_app(PlayerTuning::release());

    input(&mut app, player).jump_pressed = true;
    app.update();

    let state = controller(&app, player);
    let tuning = PlayerTuning::release();
    let expected = tuning.jump_velocity() + tuning.gravity * HEADLESS_FRAME_TIME;
    assert!((state.vertical_velocity - expected).abs() < 1e-4);

    run_frames(&mut app, 5);
    let height = app.world().get::<Transform>(player).map(|t| t.translation.y).unwrap_or(0.0);
    assert!(height > 0.0);
    assert!(!controller(&app, player).grounded);

    // В воздухе прыжок игнорируется
    let before = controller(&app, player).vertical_velocity;
    input(&mut app, player).jump_pressed = true;
    app.update();
    assert!(controller(&app, player).vertical_velocity < before);
}

#[test]
fn test_look_rotates_camera_and_body() {
    let (mut app, player) = test_app(PlayerTuning::release());

    input(&mut app, player).mouse_delta = Vec2::new(0.0, 1000.0);
    app.update();

    let state = controller(&app, player);
    assert_eq!(state.pitch, -90.0);

    let camera_rotation = app
        .world()
        .get::<Transform>(state.camera)
        .map(|t| t.rotation)
        .unwrap_or_default();
    assert!(camera_rotation.angle_between(Quat::from_rotation_x(90f32.to_radians())) < 1e-4);

    // Mouse delta сброшен в конце frame: pitch стоит
    app.update();
    assert_eq!(controller(&app, player).pitch, -90.0);

    input(&mut app, player).mouse_delta = Vec2::new(36.0, 0.0);
    app.update();
    let body = app.world().get::<Transform>(player).map(|t| t.rotation).unwrap_or_default();
    assert!(body.angle_between(Quat::from_rotation_y(-90f32.to_radians())) < 1e-4);
}

#[test]
fn test_crouch_transition_and_release() {
    let tuning = PlayerTuning::release();
    let (mut app, player) = test_app(tuning.clone());

    input(&mut app, player).crouch_pressed = true;
    app.update();

    let state = controller(&app, player);
    assert!(state.crouching);
    assert_eq!(state.move_speed, 2.0);
    assert_eq!(
        app.world().get::<CharacterHeight>(player).map(|h| h.0),
        Some(tuning.crouched_height)
    );

    run_frames(&mut app, 20);
    assert_eq!(camera_translation(&app, player), tuning.crouched_camera_offset);

    input(&mut app, player).crouch_released = true;
    run_frames(&mut app, 20);

    let state = controller(&app, player);
    assert!(!state.crouching);
    assert_eq!(state.move_speed, 6.0);
    assert_eq!(camera_translation(&app, player), tuning.standing_camera_offset);
    assert_eq!(
        app.world().get::<CharacterHeight>(player).map(|h| h.0),
        Some(tuning.standing_height)
    );
}

#[test]
fn test_second_crouch_transition_supersedes_first() {
    let tuning = PlayerTuning::release();
    let (mut app, player) = test_app(tuning.clone());

    input(&mut app, player).crouch_pressed = true;
    run_frames(&mut app, 4); // ~половина 0.2 сек

    let midway = camera_translation(&app, player);
    assert!(midway.y < tuning.standing_camera_offset.y);
    assert!(midway.y > tuning.crouched_camera_offset.y);

    input(&mut app, player).crouch_released = true;
    app.update();

    let transitions = app
        .world()
        .get::<PlayerTransitions>(player)
        .cloned()
        .unwrap_or_default();
    let tween = transitions.camera_offset.expect("stand-up transition in flight");
    assert_eq!(tween.end, tuning.standing_camera_offset);

    run_frames(&mut app, 30);
    assert_eq!(camera_translation(&app, player), tuning.standing_camera_offset);
}

#[test]
fn test_sprint_locked_until_state4() {
    let tuning = PlayerTuning::release();
    let (mut app, player) = test_app(tuning.clone());

    {
        let mut input = input(&mut app, player);
        input.axes = Vec2::new(0.0, 1.0);
        input.sprint_pressed = true;
    }
    run_frames(&mut app, 15);

    let state = controller(&app, player);
    assert!(!state.sprinting);
    assert_eq!(state.move_speed, 6.0);
    assert_eq!(camera_fov(&app, player), tuning.normal_fov);
}

#[test]
fn test_sprint_after_state4() {
    let tuning = PlayerTuning::release();
    let (mut app, player) = test_app(tuning.clone());

    reach_tier(&mut app, SpeedTier::State2);
    reach_tier(&mut app, SpeedTier::State3);
    reach_tier(&mut app, SpeedTier::State4);
    assert_eq!(controller(&app, player).walk_speed, 6.0);

    // Sprint только в движении
    input(&mut app, player).sprint_pressed = true;
    app.update();
    assert!(!controller(&app, player).sprinting);

    {
        let mut input = input(&mut app, player);
        input.axes = Vec2::new(0.0, 1.0);
        input.sprint_pressed = true;
    }
    run_frames(&mut app, 20);

    let state = controller(&app, player);
    assert!(state.sprinting);
    assert_eq!(state.move_speed, 10.0);
    assert_eq!(camera_fov(&app, player), tuning.sprint_fov);

    input(&mut app, player).sprint_released = true;
    run_frames(&mut app, 20);

    let state = controller(&app, player);
    assert!(!state.sprinting);
    assert_eq!(state.move_speed, 6.0);
    assert_eq!(camera_fov(&app, player), tuning.normal_fov);
}

#[test]
fn test_second_sprint_transition_supersedes_first() {
    let tuning = PlayerTuning::release();
    let (mut app, player) = test_app(tuning.clone());
    for tier in SpeedTier::ALL {
        reach_tier(&mut app, tier);
    }

    {
        let mut input = input(&mut app, player);
        input.axes = Vec2::new(0.0, 1.0);
        input.sprint_pressed = true;
    }
    run_frames(&mut app, 4);

    let midway = camera_fov(&app, player);
    assert!(midway > tuning.normal_fov && midway < tuning.sprint_fov, "fov = {}", midway);

    input(&mut app, player).sprint_released = true;
    app.update();

    let transitions = app
        .world()
        .get::<PlayerTransitions>(player)
        .cloned()
        .unwrap_or_default();
    let tween = transitions.fov.expect("release transition in flight");
    assert_eq!(tween.end, tuning.normal_fov);
    assert_eq!(tween.start, midway);

    run_frames(&mut app, 20);
    assert!(!controller(&app, player).sprinting);
    assert_eq!(camera_fov(&app, player), tuning.normal_fov);
}

#[test]
fn test_headbob_returns_to_rest_when_idle() {
    let (mut app, player) = test_app(PlayerTuning::release());
    let rest = headbob(&app, player).rest_position;
    let displaced = rest + Vec3::new(0.05, 0.2, 0.0);

    set_camera_translation(&mut app, player, displaced);
    app.update();

    let t = HEADBOB_RETURN_RATE * HEADLESS_FRAME_TIME;
    let expected = displaced.lerp(rest, t);
    let actual = camera_translation(&app, player);
    assert!(actual.distance(expected) < 1e-5, "{:?} vs {:?}", actual, expected);

    run_frames(&mut app, 120);
    assert!(camera_translation(&app, player).distance(rest) < 1e-4);
}

#[test]
fn test_headbob_holds_position_while_crouching() {
    let tuning = PlayerTuning::release();
    let (mut app, player) = test_app(tuning.clone());

    input(&mut app, player).crouch_pressed = true;
    run_frames(&mut app, 20);
    assert!(controller(&app, player).crouching);

    let held = tuning.crouched_camera_offset + Vec3::new(0.1, 0.0, 0.0);
    set_camera_translation(&mut app, player, held);
    run_frames(&mut app, 30);

    assert_eq!(camera_translation(&app, player), held);
    assert_ne!(held, headbob(&app, player).rest_position);
}

#[test]
fn test_headbob_adds_to_current_position() {
    let (mut app, player) = test_app(PlayerTuning::release());
    let effect = headbob(&app, player);
    let start = effect.rest_position + Vec3::new(0.0, 0.2, 0.0);

    set_camera_translation(&mut app, player, start);
    input(&mut app, player).axes = Vec2::new(0.0, 1.0);
    app.update();

    let state = controller(&app, player);
    assert!(state.moving && state.grounded);

    let time = app.world().resource::<Time>();
    let bob = effect.bob_delta(time.elapsed_secs(), time.delta_secs());
    let t = HEADBOB_RETURN_RATE * time.delta_secs();
    // Качание от текущей позиции, затем возврат к rest
    let expected = (start + bob).lerp(effect.rest_position, t);

    let actual = camera_translation(&app, player);
    assert!(actual.distance(expected) < 1e-5, "{:?} vs {:?}", actual, expected);
}

#[test]
fn test_crouch_blocked_while_sprinting() {
    let (mut app, player) = test_app(PlayerTuning::release());
    for tier in SpeedTier::ALL {
        reach_tier(&mut app, tier);
    }

    {
        let mut input = input(&mut app, player);
        input.axes = Vec2::new(0.0, 1.0);
        input.sprint_pressed = true;
    }
    app.update();
    assert!(controller(&app, player).sprinting);

    input(&mut app, player).crouch_pressed = true;
    app.update();

    let state = controller(&app, player);
    assert!(state.sprinting);
    assert!(!state.crouching);
}

#[test]
fn test_footsteps_while_walking() {
    let tuning = PlayerTuning::release();
    let (mut app, player) = test_app(tuning.clone());

    input(&mut app, player).axes = Vec2::new(1.0, 0.0);
    run_frames(&mut app, 120);

    let steps = &app.world().resource::<CollectedFootsteps>().0;
    assert!(steps.len() >= 2, "steps = {}", steps.len());
    for step in steps {
        assert_eq!(step.entity, player);
        assert!(
            (tuning.footstep_pitch_min..=tuning.footstep_pitch_max).contains(&step.pitch),
            "pitch = {}",
            step.pitch
        );
    }
}

#[test]
fn test_no_footsteps_when_idle_or_disabled() {
    let (mut app, _player) = test_app(PlayerTuning::release());
    run_frames(&mut app, 60);
    assert!(app.world().resource::<CollectedFootsteps>().0.is_empty());

    let (mut app, player) = test_app(PlayerTuning::prototype());
    input(&mut app, player).axes = Vec2::new(0.0, 1.0);
    run_frames(&mut app, 60);
    assert!(app.world().resource::<CollectedFootsteps>().0.is_empty());
}

#[test]
fn test_pickup_page() {
    let (mut app, player) = test_app(PlayerTuning::release());
    let page = app.world_mut().spawn(Pickable).id();

    look_at(&mut app, player, page);
    app.update();

    let prompt = app.world().resource::<InteractPrompt>().clone();
    assert!(prompt.visible);
    assert_eq!(prompt.text, "Press E to pick up");

    input(&mut app, player).interact_pressed = true;
    app.update();

    assert!(app.world().get_entity(page).is_err(), "page despawned");
    assert!(!app.world().resource::<InteractPrompt>().visible);
    assert_eq!(app.world().resource::<StageManager>().collected(), 1);
}

#[test]
fn test_non_pickable_target_hides_prompt() {
    let (mut app, player) = test_app(PlayerTuning::release());
    let wall = app.world_mut().spawn(Transform::default()).id();

    app.world_mut().resource_mut::<InteractPrompt>().show("stale");
    look_at(&mut app, player, wall);
    input(&mut app, player).interact_pressed = true;
    app.update();

    assert!(!app.world().resource::<InteractPrompt>().visible);
    assert!(app.world().get_entity(wall).is_ok());
    assert_eq!(app.world().resource::<StageManager>().collected(), 0);
}
