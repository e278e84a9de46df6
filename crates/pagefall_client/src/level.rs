use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use pagefall_simulation::physics::layers;
use pagefall_simulation::scene::{FOREST_SCENE, MAIN_MENU_SCENE};
use pagefall_simulation::{
    logger, spawn_player, Pickable, PlayerTuning, SceneLoaded, SceneSwitchRequest, SimulationSet,
    StageManager,
};

use crate::rendering::NeedsVisual;
use crate::ui::spawn_main_menu;

/// Радиус поляны, где раскиданы страницы
const FOREST_RADIUS: f32 = 28.0;
const TREE_COUNT: usize = 60;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, open_main_menu)
            .add_systems(Update, rebuild_scene.after(SimulationSet::Scene));
    }
}

/// Marker: entity принадлежит текущей сцене (despawn при смене)
#[derive(Component)]
pub struct SceneMember;

fn open_main_menu(mut requests: EventWriter<SceneSwitchRequest>) {
    requests.write(SceneSwitchRequest::Load(MAIN_MENU_SCENE.to_string()));
}

/// SceneLoaded → снести старую сцену, собрать новую
fn rebuild_scene(
    mut commands: Commands,
    mut loaded: EventReader<SceneLoaded>,
    members: Query<Entity, With<SceneMember>>,
    manager: Res<StageManager>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(scene) = loaded.read().last() else {
        return;
    };

    for entity in members.iter() {
        commands.entity(entity).despawn();
    }

    match scene.name.as_str() {
        MAIN_MENU_SCENE => spawn_main_menu(&mut commands),
        FOREST_SCENE => {
            let remaining = manager.max_pages().saturating_sub(manager.collected());
            spawn_forest(&mut commands, &mut meshes, &mut materials, remaining);
        }
        other => logger::log_warning(&format!("Scene '{}' has no level layout", other)),
    }
}

fn spawn_forest(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    pages: u32,
) {
    // Ground (60x60m)
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(30.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.12, 0.16, 0.10))),
        Transform::default(),
        Collider::cuboid(30.0, 0.05, 30.0),
        layers::environment_groups(),
        SceneMember,
    ));

    // Moonlight
    commands.spawn((
        DirectionalLight {
            illuminance: 800.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -1.0, 0.4, 0.0)),
        SceneMember,
    ));

    // Trees: кольца стволов, детерминированная раскладка (золотой угол)
    let trunk_mesh = meshes.add(Cylinder::new(0.35, 8.0));
    let trunk_material = materials.add(Color::srgb(0.18, 0.13, 0.10));
    for i in 0..TREE_COUNT {
        let angle = i as f32 * 2.399_963;
        let radius = 4.0 + (i as f32 / TREE_COUNT as f32).sqrt() * FOREST_RADIUS;
        let position = Vec3::new(angle.cos() * radius, 4.0, angle.sin() * radius);

        commands.spawn((
            Mesh3d(trunk_mesh.clone()),
            MeshMaterial3d(trunk_material.clone()),
            Transform::from_translation(position),
            Collider::cylinder(4.0, 0.35),
            layers::environment_groups(),
            SceneMember,
        ));
    }

    // Pages: между деревьями, на уровне глаз
    for i in 0..pages {
        let angle = i as f32 * 2.399_963 + 1.2;
        let radius = 6.0 + (i as f32 / pages.max(1) as f32) * (FOREST_RADIUS - 6.0);
        let position = Vec3::new(angle.cos() * radius, 1.4, angle.sin() * radius);

        commands.spawn((
            Name::new(format!("Page_{}", i)),
            Pickable,
            Transform::from_translation(position),
            Collider::cuboid(0.15, 0.2, 0.05),
            Sensor,
            layers::interactable_groups(),
            NeedsVisual,
            SceneMember,
        ));
    }

    let player = spawn_player(commands, Vec3::new(0.0, 1.1, 0.0), PlayerTuning::release());
    commands.entity(player).insert(SceneMember);

    logger::log_info(&format!("Forest built: {} pages, {} trees", pages, TREE_COUNT));
}
