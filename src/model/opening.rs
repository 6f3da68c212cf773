use serde::{Deserialize, Serialize};

use crate::geometry::Bounds2;
use crate::math::{UnitQuaternion, Vector3};

slotmap::new_key_type! {
    /// Unique identifier for an opening in a planner session.
    pub struct OpeningId;
}

/// What kind of opening occupies the wall span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

/// A door or window placed on one wall.
///
/// The anchor is always derived from `wall_index` and `position_cm`; the
/// `offset` and `relative_rotation` only move the visual placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub kind: OpeningKind,
    pub wall_index: usize,
    /// Distance from the wall start to the opening's near edge, centimetres.
    pub position_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    /// Offset from the anchor in metres; `offset.y` is the sill height.
    pub offset: Vector3,
    /// Rotation relative to the wall's base orientation.
    pub relative_rotation: UnitQuaternion,
}

impl Opening {
    /// Creates an opening sitting on the floor, aligned with its wall.
    #[must_use]
    pub fn new(kind: OpeningKind, wall_index: usize, position_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            kind,
            wall_index,
            position_cm,
            width_cm,
            height_cm,
            offset: Vector3::zeros(),
            relative_rotation: UnitQuaternion::identity(),
        }
    }

    /// Sets the anchor-relative offset in metres.
    #[must_use]
    pub fn with_offset(mut self, offset: Vector3) -> Self {
        self.offset = offset;
        self
    }

    /// The rectangle the opening occupies in its wall's `(u, v)` frame, metres.
    #[must_use]
    pub fn wall_rect(&self) -> Bounds2 {
        let u0 = self.position_cm / 100.0;
        let v0 = self.offset.y;
        Bounds2::new(u0, u0 + self.width_cm / 100.0, v0, v0 + self.height_cm / 100.0)
    }
}
