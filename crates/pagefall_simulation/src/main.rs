//! Headless прогон Pagefall
//!
//! Скриптованный игрок без рендера: идёт вперёд, подбирает страницы одну за другой,
//! пока StageManager не дойдёт до финала. Печатает веса mood profiles и скорость.
//!
//! ```text
//! pagefall_simulation [--prototype] [--seed N] [--quiet] [--config stage.json] [--dump-config]
//! ```
//!
//! `--config` заменяет пороги и mood profiles (JSON `StageConfig`), tuning игрока
//! остаётся от release/prototype. `--dump-config` печатает итоговый конфиг и выходит.

use bevy::prelude::*;
use pagefall_simulation::{
    create_headless_app, logger, spawn_player, HeadlessMotorPlugin, LogLevel, LookTarget,
    PageCollected, Pickable, PlayerController, PlayerInput, PlayerTuning, SimulationPlugin,
    StageConfig, StageManager,
};

/// Frames ходьбы между страницами (~1 сек)
const WALK_FRAMES: usize = 60;

/// Предел на случай, если финал так и не наступил
const MAX_PAGES_ATTEMPTS: u32 = 64;

fn main() {
    logger::init_logger();

    let mut prototype = false;
    let mut seed = 42;
    let mut config_path: Option<String> = None;
    let mut dump_config = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--prototype" => prototype = true,
            // Только warnings/errors от logger'а, отчёт по страницам остаётся
            "--quiet" => logger::set_log_level(LogLevel::Warning),
            "--seed" => match args.next().and_then(|value| value.parse().ok()) {
                Some(value) => seed = value,
                None => logger::log_error(&format!("--seed expects a number, keeping {}", seed)),
            },
            "--config" => match args.next() {
                Some(path) => config_path = Some(path),
                None => logger::log_error("--config expects a path"),
            },
            "--dump-config" => dump_config = true,
            other => logger::log_warning(&format!("Unknown argument: {}", other)),
        }
    }

    let (mut stage, tuning) = if prototype {
        (StageConfig::prototype(), PlayerTuning::prototype())
    } else {
        (StageConfig::release(), PlayerTuning::release())
    };
    if let Some(path) = config_path {
        match load_stage_config(&path) {
            Ok(loaded) => stage = loaded,
            Err(message) => logger::log_error(&message),
        }
    }

    if dump_config {
        match stage.to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => logger::log_error(&format!("Failed to serialize StageConfig: {}", err)),
        }
        return;
    }
    // Prototype без look ray: PageCollected шлём напрямую
    let interaction = tuning.features.interaction;

    println!(
        "Starting Pagefall headless run (seed: {}, config: {})",
        seed,
        if prototype { "prototype" } else { "release" }
    );

    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin::new(stage), HeadlessMotorPlugin::default()));

    let player = spawn_player(&mut app.world_mut().commands(), Vec3::ZERO, tuning);
    app.world_mut().flush();
    app.update();

    if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
        input.axes = Vec2::new(0.0, 1.0);
    }

    let mut attempts = 0;
    while !app.world().resource::<StageManager>().is_completed() && attempts < MAX_PAGES_ATTEMPTS {
        attempts += 1;

        for _ in 0..WALK_FRAMES {
            app.update();
        }

        if interaction {
            let page = app.world_mut().spawn(Pickable).id();
            if let Some(mut target) = app.world_mut().get_mut::<LookTarget>(player) {
                target.0 = Some(page);
            }
            if let Some(mut input) = app.world_mut().get_mut::<PlayerInput>(player) {
                input.interact_pressed = true;
            }
            app.update();
        } else {
            app.world_mut().send_event(PageCollected {
                page: Entity::PLACEHOLDER,
            });
            app.update();
        }

        report(app.world(), player);
    }

    let position = app
        .world()
        .get::<Transform>(player)
        .map(|transform| transform.translation)
        .unwrap_or_default();
    println!(
        "Run complete after {} pages: player at ({:.2}, {:.2}, {:.2}), {} entities",
        attempts,
        position.x,
        position.y,
        position.z,
        app.world().entities().len()
    );
}

fn load_stage_config(path: &str) -> Result<StageConfig, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read stage config {}: {}", path, err))?;
    let config = StageConfig::from_json(&json)
        .map_err(|err| format!("Invalid stage config {}: {}", path, err))?;
    logger::log_info(&format!(
        "Loaded stage config {} (thresholds {:?}, {} profiles)",
        path,
        config.thresholds,
        config.profiles.len()
    ));
    Ok(config)
}

fn report(world: &World, player: Entity) {
    let manager = world.resource::<StageManager>();
    let (from, to) = manager.pair();
    let weights: Vec<String> = manager
        .weights()
        .iter()
        .map(|weight| format!("{:.2}", weight))
        .collect();
    let walk_speed = world
        .get::<PlayerController>(player)
        .map(|controller| controller.walk_speed)
        .unwrap_or_default();

    println!(
        "Pages {:>2}/{}: profiles {}→{} target {:.2}, weights [{}], walk speed {:.1}",
        manager.collected(),
        manager.max_pages(),
        from,
        to,
        manager.target_blend(),
        weights.join(", "),
        walk_speed
    );
}
