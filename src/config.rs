//! Game balance configuration
//!
//! Defaults come from [`crate::consts`]. Partial JSON overrides can be applied
//! for tuning; on the web they are read from LocalStorage.

use std::fmt;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading a configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON could not be parsed into a config
    Parse(String),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config field `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Every tunable of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    // === Geometry ===
    pub block_size: f32,
    pub boundary_size: f32,
    pub cube_dim_small_multiplier: f32,
    pub breakpoint_sm_rem: f32,
    /// Center of the playfield
    pub origin: Vec3,

    // === Movement ===
    pub init_speed: f32,
    pub boost_multiplier: f32,
    pub increment_base_speed: f32,

    // === Stamina ===
    pub max_stamina_blocks: u32,
    pub stamina_depletion_ms: u64,
    pub fruit_per_stamina_block: u32,

    // === Progression ===
    pub init_max_score: u64,
    pub score_per_fruit: u64,
    pub increment_fruit_count: u32,
    pub levels_to_increment_fruit: u32,
    pub grow_batch: usize,

    // === Announcements ===
    pub level_up_timeout_ms: u64,
    pub reset_notice_timeout_ms: u64,

    // === Colors (0xRRGGBB) ===
    pub color_head: u32,
    pub color_body: u32,
    pub color_fruit: u32,
    pub color_boundary: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            boundary_size: BOUNDARY_SIZE,
            cube_dim_small_multiplier: CUBE_DIM_SMALL_MULTIPLIER,
            breakpoint_sm_rem: BREAKPOINT_SM_REM,
            origin: Vec3::ZERO,

            init_speed: INIT_SPEED,
            boost_multiplier: BOOST_MULTIPLIER,
            increment_base_speed: INCREMENT_BASE_SPEED,

            max_stamina_blocks: MAX_STAMINA_BLOCKS,
            stamina_depletion_ms: STAMINA_DEPLETION_MS,
            fruit_per_stamina_block: FRUIT_PER_STAMINA_BLOCK,

            init_max_score: INIT_MAX_SCORE,
            score_per_fruit: SCORE_PER_FRUIT,
            increment_fruit_count: INCREMENT_FRUIT_COUNT,
            levels_to_increment_fruit: LEVELS_TO_INCREMENT_FRUIT,
            grow_batch: GROW_BATCH,

            level_up_timeout_ms: LEVEL_UP_TIMEOUT_MS,
            reset_notice_timeout_ms: RESET_NOTICE_TIMEOUT_MS,

            color_head: COLOR_HEAD,
            color_body: COLOR_BODY,
            color_fruit: COLOR_FRUIT,
            color_boundary: COLOR_BOUNDARY,
        }
    }
}

impl SnakeConfig {
    /// Parse partial JSON overrides on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SnakeConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        positive("block_size", self.block_size)?;
        positive("boundary_size", self.boundary_size)?;
        positive("cube_dim_small_multiplier", self.cube_dim_small_multiplier)?;
        positive("breakpoint_sm_rem", self.breakpoint_sm_rem)?;
        positive("init_speed", self.init_speed)?;
        positive("boost_multiplier", self.boost_multiplier)?;

        if !self.origin.is_finite() {
            return Err(ConfigError::Invalid {
                field: "origin",
                reason: "must be finite",
            });
        }
        if !self.increment_base_speed.is_finite() || self.increment_base_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "increment_base_speed",
                reason: "must be a non-negative finite number",
            });
        }
        if self.stamina_depletion_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "stamina_depletion_ms",
                reason: "must be greater than zero",
            });
        }
        if self.fruit_per_stamina_block == 0 {
            return Err(ConfigError::Invalid {
                field: "fruit_per_stamina_block",
                reason: "must be greater than zero",
            });
        }
        if self.levels_to_increment_fruit == 0 {
            return Err(ConfigError::Invalid {
                field: "levels_to_increment_fruit",
                reason: "must be greater than zero",
            });
        }
        if self.init_max_score == 0 {
            return Err(ConfigError::Invalid {
                field: "init_max_score",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    pub fn stamina_interval(&self) -> Duration {
        Duration::from_millis(self.stamina_depletion_ms)
    }

    pub fn level_up_timeout(&self) -> Duration {
        Duration::from_millis(self.level_up_timeout_ms)
    }

    pub fn reset_notice_timeout(&self) -> Duration {
        Duration::from_millis(self.reset_notice_timeout_ms)
    }

    /// LocalStorage key for tuning overrides
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "box_snake_config";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config overrides from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring config overrides: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_load_uses_defaults() {
        assert_eq!(SnakeConfig::load(), SnakeConfig::default());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(SnakeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let config = SnakeConfig::from_json(r#"{ "init_speed": 8.0, "max_stamina_blocks": 6 }"#)
            .expect("valid overrides");
        assert_eq!(config.init_speed, 8.0);
        assert_eq!(config.max_stamina_blocks, 6);
        // Untouched fields keep their defaults
        assert_eq!(config.boost_multiplier, BOOST_MULTIPLIER);
        assert_eq!(config.stamina_interval(), Duration::from_millis(2500));
    }

    #[test]
    fn test_origin_override() {
        let config = SnakeConfig::from_json(r#"{ "origin": [0.0, 0.0, -200.0] }"#).unwrap();
        assert_eq!(config.origin, Vec3::new(0.0, 0.0, -200.0));
    }

    #[test]
    fn test_parse_error() {
        let err = SnakeConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = SnakeConfig::from_json(r#"{ "stamina_depletion_ms": 0 }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                field: "stamina_depletion_ms",
                reason: "must be greater than zero",
            }
        );
        assert!(err.to_string().contains("stamina_depletion_ms"));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let err = SnakeConfig::from_json(r#"{ "init_speed": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "init_speed", .. }));
    }
}
