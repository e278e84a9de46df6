//! Stage configuration: пороги, длительность crossfade, mood profiles

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Именованный набор визуальных параметров (post-process "volume profile")
///
/// Client смешивает профили по весам в fog / ambient / clear color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodProfile {
    pub name: String,
    /// Linear RGB
    pub fog_color: [f32; 3],
    pub fog_density: f32,
    pub ambient_brightness: f32,
    /// Linear RGB тонировка ambient света
    pub ambient_tint: [f32; 3],
}

impl MoodProfile {
    pub fn new(
        name: &str,
        fog_color: [f32; 3],
        fog_density: f32,
        ambient_brightness: f32,
        ambient_tint: [f32; 3],
    ) -> Self {
        Self {
            name: name.to_string(),
            fog_color,
            fog_density,
            ambient_brightness,
            ambient_tint,
        }
    }

    /// Пять стадий: от спокойного леса до почти полной темноты
    pub fn default_set() -> Vec<MoodProfile> {
        vec![
            MoodProfile::new("Calm", [0.55, 0.62, 0.70], 0.015, 400.0, [1.0, 1.0, 1.0]),
            MoodProfile::new("Uneasy", [0.45, 0.48, 0.52], 0.030, 300.0, [0.90, 0.92, 1.0]),
            MoodProfile::new("Dread", [0.30, 0.28, 0.30], 0.050, 200.0, [0.85, 0.75, 0.80]),
            MoodProfile::new("Panic", [0.25, 0.10, 0.10], 0.075, 120.0, [1.0, 0.55, 0.50]),
            MoodProfile::new("Void", [0.05, 0.03, 0.05], 0.110, 60.0, [0.60, 0.40, 0.70]),
        ]
    }
}

/// Конфигурация StageManager
///
/// `thresholds`: четыре возрастающих порога: первые три дают speed tiers
/// State2/State3/State4, последний: максимум счётчика и финал.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub thresholds: [u32; 4],
    /// Длительность crossfade между профилями (сек)
    pub transition_duration: f32,
    pub profiles: Vec<MoodProfile>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self::release()
    }
}

impl StageConfig {
    /// 6 / 10 / 15 / 20
    pub fn release() -> Self {
        Self {
            thresholds: [6, 10, 15, 20],
            transition_duration: 2.0,
            profiles: MoodProfile::default_set(),
        }
    }

    /// 2 / 6 / 10 / 15: ранняя, более короткая раскладка
    pub fn prototype() -> Self {
        Self {
            thresholds: [2, 6, 10, 15],
            ..Self::release()
        }
    }

    pub fn max_pages(&self) -> u32 {
        self.thresholds[3]
    }

    /// JSON → StageConfig (headless `--config`)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_config_from_json() {
        let json = r#"{
            "thresholds": [3, 5, 8, 12],
            "transition_duration": 1.5,
            "profiles": [
                { "name": "Dawn", "fog_color": [0.6, 0.6, 0.7], "fog_density": 0.01,
                  "ambient_brightness": 500.0, "ambient_tint": [1.0, 1.0, 1.0] },
                { "name": "Night", "fog_color": [0.0, 0.0, 0.05], "fog_density": 0.2,
                  "ambient_brightness": 20.0, "ambient_tint": [0.5, 0.5, 0.8] }
            ]
        }"#;

        let config = StageConfig::from_json(json).expect("valid config");
        assert_eq!(config.max_pages(), 12);
        assert_eq!(config.transition_duration, 1.5);
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.profiles[1].name, "Night");
    }

    #[test]
    fn test_dumped_release_config_loads_back() {
        let json = StageConfig::release().to_json().expect("serializable");
        assert!(json.contains("\"Calm\""));
        assert_eq!(StageConfig::from_json(&json).ok(), Some(StageConfig::release()));
    }

    #[test]
    fn test_config_missing_fields_is_error() {
        assert!(StageConfig::from_json(r#"{ "thresholds": [1, 2, 3, 4] }"#).is_err());
        assert!(StageConfig::from_json("not json").is_err());
    }
}
