//! Builder Configuration
//!
//! Every tunable the placement workflow reads: snapping reach, floor
//! spacing, scale steps, validation tolerance and the ghost look. `Default`
//! matches the values the tool has always shipped with; a JSON file can
//! override any subset of them.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::builder::BuildError;

/// Tunables for [`crate::game::builder::PlacementSession`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Initial snap threshold (world units) between bottom centers
    pub snap_threshold: f32,
    /// Vertical distance between consecutive floors
    pub floor_step: i32,
    /// Scale change per rescale command
    pub scale_step: f32,
    /// Smallest scale a ghost axis may shrink to
    pub min_scale: f32,
    /// Footprint width/depth difference below which a module counts as square
    pub square_epsilon: f32,
    /// Width/depth difference below which bounds are already uniform
    pub uniform_epsilon: f32,
    /// Shrink factor applied to the ghost before overlap validation
    pub validation_tolerance: f32,
    /// Horizontal reach of the neighbor search, in uniform half-widths
    pub search_multiplier: f32,
    /// How far the vertical probe reaches below the ghost
    pub vertical_probe_depth: f32,
    /// Minimum time between two floor changes (milliseconds)
    pub elevation_cooldown_ms: u64,
    /// Alpha of the ghost tint
    pub ghost_alpha: f32,
    /// Yaw applied by one rotate command (degrees)
    pub rotate_step_degrees: f32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 1.5,
            floor_step: 3,
            scale_step: 0.1,
            min_scale: 0.1,
            square_epsilon: 0.01,
            uniform_epsilon: 1e-3,
            validation_tolerance: 0.98,
            search_multiplier: 3.0,
            vertical_probe_depth: 2.0,
            elevation_cooldown_ms: 200,
            ghost_alpha: 0.4,
            rotate_step_degrees: 90.0,
        }
    }
}

impl BuilderConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        debug!(path = %path.display(), "loaded builder config");
        Ok(config)
    }

    pub fn elevation_cooldown(&self) -> Duration {
        Duration::from_millis(self.elevation_cooldown_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.snap_threshold, 1.5);
        assert_eq!(config.floor_step, 3);
        assert_eq!(config.validation_tolerance, 0.98);
        assert_eq!(config.elevation_cooldown(), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BuilderConfig::from_json(r#"{ "floor_step": 4, "ghost_alpha": 0.5 }"#).unwrap();
        assert_eq!(config.floor_step, 4);
        assert_eq!(config.ghost_alpha, 0.5);
        assert_eq!(config.snap_threshold, 1.5);
        assert_eq!(config.scale_step, 0.1);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            BuilderConfig::from_json("{ floor_step: }"),
            Err(BuildError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("modular_builder_missing_config.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(BuilderConfig::load(&path), Err(BuildError::Io(_))));
    }
}
