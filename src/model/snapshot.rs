use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

use super::{Opening, Segment, TileSize, WallConfig};

/// The persisted state of a plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSnapshot {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub walls: Vec<WallConfig>,
    #[serde(default)]
    pub openings: Vec<Opening>,
    #[serde(default)]
    pub tile_size: TileSize,
}

impl PlanSnapshot {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self).map_err(ConfigError::Parse)?)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a snapshot.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(ConfigError::Parse)?)
    }
}
