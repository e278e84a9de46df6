use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use pagefall_simulation::{MoodProfile, MoodVolume, StageManager};

pub struct MoodRenderingPlugin;

impl Plugin for MoodRenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BlendedMood>().add_systems(
            Update,
            (
                spawn_page_visuals,
                spin_pages,
                blend_mood_volumes,
                apply_mood,
            )
                .chain(),
        );
    }
}

/// Marker: simulation entity needs visual representation
#[derive(Component)]
pub struct NeedsVisual;

/// Страница в уровне (для анимации)
#[derive(Component)]
pub struct PageVisual {
    pub spin_speed: f32,
}

/// Смесь mood profiles по текущим весам
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BlendedMood {
    pub fog_color: Vec3,
    pub fog_density: f32,
    pub ambient_brightness: f32,
    pub ambient_tint: Vec3,
}

impl Default for BlendedMood {
    fn default() -> Self {
        Self::from_profile(&MoodProfile::default_set()[0])
    }
}

impl BlendedMood {
    fn from_profile(profile: &MoodProfile) -> Self {
        Self {
            fog_color: Vec3::from_array(profile.fog_color),
            fog_density: profile.fog_density,
            ambient_brightness: profile.ambient_brightness,
            ambient_tint: Vec3::from_array(profile.ambient_tint),
        }
    }

    fn zero() -> Self {
        Self {
            fog_color: Vec3::ZERO,
            fog_density: 0.0,
            ambient_brightness: 0.0,
            ambient_tint: Vec3::ZERO,
        }
    }

    fn add_weighted(&mut self, profile: &MoodProfile, weight: f32) {
        self.fog_color += Vec3::from_array(profile.fog_color) * weight;
        self.fog_density += profile.fog_density * weight;
        self.ambient_brightness += profile.ambient_brightness * weight;
        self.ambient_tint += Vec3::from_array(profile.ambient_tint) * weight;
    }
}

/// Page mesh на самой simulation entity (страницы статичны, отдельный visual не нужен)
fn spawn_page_visuals(
    mut commands: Commands,
    query: Query<Entity, With<NeedsVisual>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for entity in query.iter() {
        commands.entity(entity).remove::<NeedsVisual>().insert((
            Mesh3d(meshes.add(Cuboid::new(0.3, 0.4, 0.02))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.92, 0.90, 0.82),
                emissive: LinearRgba::rgb(0.4, 0.38, 0.3),
                ..default()
            })),
            PageVisual { spin_speed: 0.8 },
        ));
    }
}

fn spin_pages(mut pages: Query<(&PageVisual, &mut Transform)>, time: Res<Time>) {
    for (page, mut transform) in pages.iter_mut() {
        transform.rotate_y(page.spin_speed * time.delta_secs());
    }
}

/// MoodVolume weights × StageManager profiles → BlendedMood
fn blend_mood_volumes(
    volumes: Query<&MoodVolume>,
    changed: Query<(), Changed<MoodVolume>>,
    manager: Res<StageManager>,
    mut mood: ResMut<BlendedMood>,
) {
    if changed.is_empty() {
        return;
    }

    let mut blended = BlendedMood::zero();
    for volume in volumes.iter() {
        if let Some(profile) = manager.profiles().get(volume.index) {
            blended.add_weighted(profile, volume.weight);
        }
    }

    *mood = blended;
}

/// BlendedMood → fog на камерах, AmbientLight, ClearColor
fn apply_mood(
    mood: Res<BlendedMood>,
    mut fogs: Query<&mut DistanceFog>,
    mut ambient: ResMut<AmbientLight>,
    mut clear_color: ResMut<ClearColor>,
) {
    // Fog каждый frame: у только что созданной камеры он ещё дефолтный
    let fog_color = Color::linear_rgb(mood.fog_color.x, mood.fog_color.y, mood.fog_color.z);

    for mut fog in fogs.iter_mut() {
        fog.color = fog_color;
        fog.falloff = FogFalloff::Exponential {
            density: mood.fog_density,
        };
    }

    if mood.is_changed() {
        ambient.color = Color::linear_rgb(
            mood.ambient_tint.x,
            mood.ambient_tint.y,
            mood.ambient_tint.z,
        );
        ambient.brightness = mood.ambient_brightness;
        clear_color.0 = fog_color;
    }
}
