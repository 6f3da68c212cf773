use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::math::PLAN_EPSILON;
use crate::model::{TileSize, WallConfig};

/// Engine-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerConfig {
    /// Geometric tolerance in metres.
    pub epsilon: f64,
    /// Configuration given to every wall on replan.
    pub default_wall: WallConfig,
    pub default_tile_size: TileSize,
    /// Slab thickness of tessellated tiles in metres; zero gives flat caps.
    pub tile_thickness: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            epsilon: PLAN_EPSILON,
            default_wall: WallConfig::default(),
            default_tile_size: TileSize::default(),
            tile_thickness: 0.01,
        }
    }
}

impl PlannerConfig {
    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive epsilon, an invalid default tile
    /// size or a negative tile thickness.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::Invalid(format!("epsilon must be positive, got {}", self.epsilon)).into());
        }
        if !self.default_tile_size.is_valid() {
            return Err(ConfigError::Invalid("default tile size must be positive".into()).into());
        }
        if !(self.tile_thickness.is_finite() && self.tile_thickness >= 0.0) {
            return Err(ConfigError::Invalid("tile thickness must not be negative".into()).into());
        }
        Ok(())
    }
}
