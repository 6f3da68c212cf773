use nalgebra::Translation3;
use serde::{Deserialize, Serialize};

use crate::math::{Isometry3, UnitQuaternion, Vector3};
use crate::model::Opening;

use super::OpeningAnchor;

/// An opening's placement relative to its anchor.
///
/// Stored relative so edits survive walls being rebuilt from the same
/// segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningTransform {
    pub offset: Vector3,
    pub relative_rotation: UnitQuaternion,
}

impl OpeningTransform {
    /// The transform currently stored on `opening`.
    #[must_use]
    pub fn of(opening: &Opening) -> Self {
        Self {
            offset: opening.offset,
            relative_rotation: opening.relative_rotation,
        }
    }

    /// Splits a world placement into offset and rotation relative to `anchor`.
    #[must_use]
    pub fn decompose(anchor: &OpeningAnchor, world: &Isometry3) -> Self {
        Self {
            offset: world.translation.vector - anchor.position.coords,
            relative_rotation: anchor.orientation.inverse() * world.rotation,
        }
    }

    /// Rebuilds the world placement on `anchor`.
    #[must_use]
    pub fn compose(&self, anchor: &OpeningAnchor) -> Isometry3 {
        Isometry3::from_parts(
            Translation3::from(anchor.position.coords + self.offset),
            anchor.orientation * self.relative_rotation,
        )
    }

    /// Writes the transform back onto `opening`.
    pub fn apply_to(&self, opening: &mut Opening) {
        opening.offset = self.offset;
        opening.relative_rotation = self.relative_rotation;
    }
}
