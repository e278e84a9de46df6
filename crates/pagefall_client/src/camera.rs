use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use pagefall_simulation::{CameraLens, PlayerCamera, SimulationSet};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (attach_render_camera, sync_projection_fov)
                .chain()
                .after(SimulationSet::Camera),
        );
    }
}

/// Новая simulation камера → рендер камера (Camera3d + perspective + fog)
fn attach_render_camera(
    mut commands: Commands,
    cameras: Query<(Entity, &CameraLens), Added<PlayerCamera>>,
) {
    for (entity, lens) in cameras.iter() {
        commands.entity(entity).insert((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: lens.fov_degrees.to_radians(),
                ..default()
            }),
            // Цвет/плотность выставляет MoodRenderingPlugin
            DistanceFog {
                falloff: FogFalloff::Exponential { density: 0.0 },
                ..default()
            },
        ));
    }
}

/// CameraLens (градусы, вертикальный FOV) → Projection
fn sync_projection_fov(mut cameras: Query<(&CameraLens, &mut Projection), Changed<CameraLens>>) {
    for (lens, mut projection) in cameras.iter_mut() {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = lens.fov_degrees.to_radians();
        }
    }
}
