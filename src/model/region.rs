use serde::{Deserialize, Serialize};

use crate::geometry::Bounds2;

/// A user-marked rectangle on the floor or on one wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "surface")]
pub enum Region {
    /// World-space rectangle over `x` and `z`.
    Floor { bounds: Bounds2 },
    /// Wall-local rectangle over `u` (along the wall) and `v` (height).
    Wall { wall_index: usize, bounds: Bounds2 },
}

impl Region {
    #[must_use]
    pub fn bounds(&self) -> &Bounds2 {
        match self {
            Self::Floor { bounds } | Self::Wall { bounds, .. } => bounds,
        }
    }
}
