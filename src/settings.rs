//! Match settings and preferences
//!
//! Loaded from a JSON file on native builds; everything falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_RINK_HEIGHT, DEFAULT_RINK_WIDTH};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Opponent difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Opponent lateral aim error, as a fraction of rink width (full spread)
    pub fn aim_error(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.2,
            Difficulty::Medium => 0.1,
            Difficulty::Hard => 0.04,
        }
    }
}

/// Match settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Opponent skill
    pub difficulty: Difficulty,

    // === Rink ===
    pub rink_width: f32,
    pub rink_height: f32,

    /// RNG seed for the opponent's aim error
    pub seed: u64,

    /// Physics and rule constants
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            rink_width: DEFAULT_RINK_WIDTH,
            rink_height: DEFAULT_RINK_HEIGHT,
            seed: 0x5eed,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        for (field, value) in [
            ("rink_width", settings.rink_width),
            ("rink_height", settings.rink_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidSetting { field, value });
            }
        }
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({} difficulty)",
            path.display(),
            settings.difficulty.as_str()
        );
        Ok(settings)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                log::warn!("Using default settings: {e}");
                Self::default()
            }),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("impossible"), None);
        assert_eq!(Difficulty::Easy.as_str(), "Easy");
    }

    #[test]
    fn test_medium_error_is_tenth_of_width() {
        assert_eq!(Settings::default().difficulty.aim_error(), 0.1);
    }

    #[test]
    fn test_from_json_with_nested_tuning() {
        let settings = Settings::from_json(
            r#"{ "difficulty": "Hard", "rink_width": 400, "tuning": { "stones_per_end": 2 } }"#,
        )
        .expect("valid settings");
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.rink_width, 400.0);
        assert_eq!(settings.rink_height, DEFAULT_RINK_HEIGHT);
        assert_eq!(settings.tuning.stones_per_end, 2);
    }

    #[test]
    fn test_from_json_rejects_empty_rink() {
        let err = Settings::from_json(r#"{ "rink_height": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                field: "rink_height",
                ..
            }
        ));
        assert!(err.to_string().starts_with("setting `rink_height`"));
    }

    #[test]
    fn test_bad_tuning_inside_settings_names_tuning_field() {
        let err = Settings::from_json(r#"{ "tuning": { "restitution": 2.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "restitution",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default(Some(Path::new("/nonexistent/curling.json")));
        assert_eq!(settings.difficulty, Difficulty::Medium);
    }
}
