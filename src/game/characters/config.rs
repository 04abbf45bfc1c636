// Character tunables

use serde::Deserialize;
use std::path::Path;

/// Errors raised while loading or validating a [`CharacterConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Invalid value for {field}: {value} (must be a positive number)")]
    InvalidValue { field: &'static str, value: f32 },
}

/// Immutable movement and action tunables for one character.
///
/// Distances are in world units, times in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    // Locomotion
    pub walk_speed: f32,
    pub run_speed: f32,

    // Dodge
    /// Horizontal distance covered by one dodge
    pub dodge_distance: f32,
    /// Peak height of the dodge hop
    pub dodge_height: f32,
    /// Minimum time between dodge starts
    pub dodge_cooldown: f32,

    // Jump
    /// Peak height of the jump arc
    pub jump_force: f32,
    /// Duration of the whole jump arc
    pub jump_total_time: f32,

    // Combat
    /// Idle time after an attack before the combo resets
    pub combo_reset_time: f32,

    /// Longest an action waits for its animation to start before giving up
    pub max_animation_wait: f32,
}

/// Base tunables used by the player character
pub const BASE_CONFIG: CharacterConfig = CharacterConfig {
    walk_speed: 0.8,
    run_speed: 1.5,

    dodge_distance: 1.2,
    dodge_height: 0.25,
    dodge_cooldown: 0.5,

    jump_force: 1.0,
    jump_total_time: 0.6,

    combo_reset_time: 1.0,

    max_animation_wait: 1.0,
};

impl Default for CharacterConfig {
    fn default() -> Self {
        BASE_CONFIG
    }
}

impl CharacterConfig {
    /// Parse a config from RON text. Missing fields keep their base values.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Check every tunable is a positive, finite number
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("dodge_distance", self.dodge_distance),
            ("dodge_height", self.dodge_height),
            ("dodge_cooldown", self.dodge_cooldown),
            ("jump_force", self.jump_force),
            ("jump_total_time", self.jump_total_time),
            ("combo_reset_time", self.combo_reset_time),
            ("max_animation_wait", self.max_animation_wait),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }

    /// Ground speed for the given run modifier state
    pub fn ground_speed(&self, running: bool) -> f32 {
        if running {
            self.run_speed
        } else {
            self.walk_speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CharacterConfig::default();
        assert_eq!(config.walk_speed, 0.8);
        assert_eq!(config.run_speed, 1.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ground_speed() {
        let config = CharacterConfig::default();
        assert_eq!(config.ground_speed(false), 0.8);
        assert_eq!(config.ground_speed(true), 1.5);
    }

    #[test]
    fn test_parse_partial_ron() {
        let config = CharacterConfig::from_ron_str("(jump_total_time: 0.3, run_speed: 2.0)")
            .expect("valid config");
        assert_eq!(config.jump_total_time, 0.3);
        assert_eq!(config.run_speed, 2.0);
        // Unspecified fields keep base values
        assert_eq!(config.walk_speed, BASE_CONFIG.walk_speed);
    }

    #[test]
    fn test_rejects_non_positive() {
        let err = CharacterConfig::from_ron_str("(dodge_cooldown: 0.0)").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "dodge_cooldown",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let config = CharacterConfig {
            jump_force: f32::NAN,
            ..CharacterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = CharacterConfig::from_ron_str("(walk_speed: fast)").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CharacterConfig::load("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidValue {
            field: "walk_speed",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for walk_speed: -1 (must be a positive number)"
        );
    }
}
