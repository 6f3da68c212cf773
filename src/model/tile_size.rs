use serde::{Deserialize, Serialize};

/// Nominal tile dimensions in metres, shared by floor and wall tiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSize {
    pub width_m: f64,
    pub height_m: f64,
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            width_m: 0.3,
            height_m: 0.3,
        }
    }
}

impl TileSize {
    #[must_use]
    pub fn new(width_m: f64, height_m: f64) -> Self {
        Self { width_m, height_m }
    }

    /// Returns `true` if both dimensions are finite and positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width_m.is_finite() && self.height_m.is_finite() && self.width_m > 0.0 && self.height_m > 0.0
    }
}
