//! Scene switch: загрузка сцены по имени и выход из приложения
//!
//! Stateless операции: `SceneSwitchRequest::Load(name)` и `SceneSwitchRequest::Quit`.
//! Имя сцены не валидируется: что с ним делать, решает client (level spawn).

use bevy::prelude::*;

use crate::logger;
use crate::SimulationSet;

/// Event: запрос смены сцены / выхода (кнопки меню, Esc)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum SceneSwitchRequest {
    Load(String),
    Quit,
}

/// Event: сцена переключена (client пересобирает уровень)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneLoaded {
    pub name: String,
}

/// Имя активной сцены
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CurrentScene(pub String);

impl Default for CurrentScene {
    fn default() -> Self {
        Self(MAIN_MENU_SCENE.to_string())
    }
}

pub const MAIN_MENU_SCENE: &str = "MainMenu";
pub const FOREST_SCENE: &str = "Forest";

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SceneSwitchRequest>()
            .add_event::<SceneLoaded>()
            .init_resource::<CurrentScene>()
            .add_systems(Update, process_scene_switch.in_set(SimulationSet::Scene));
    }
}

/// Load → CurrentScene + SceneLoaded, Quit → AppExit
pub fn process_scene_switch(
    mut requests: EventReader<SceneSwitchRequest>,
    mut current: ResMut<CurrentScene>,
    mut loaded: EventWriter<SceneLoaded>,
    mut exit: EventWriter<AppExit>,
) {
    for request in requests.read() {
        match request {
            SceneSwitchRequest::Load(name) => {
                logger::log_info(&format!("Loading scene '{}'", name));
                current.0 = name.clone();
                loaded.write(SceneLoaded { name: name.clone() });
            }
            SceneSwitchRequest::Quit => {
                logger::log_info("Quit");
                exit.write(AppExit::Success);
            }
        }
    }
}
