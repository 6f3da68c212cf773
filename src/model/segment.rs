use serde::{Deserialize, Serialize};

/// One straight run of wall in the floor plan.
///
/// `turn_angle` is the absolute heading of the run in degrees (0° = +X,
/// 90° = +Z), not a turn relative to the previous segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Length in centimetres.
    pub length: f64,
    /// Absolute heading in degrees.
    pub turn_angle: f64,
}

impl Segment {
    #[must_use]
    pub fn new(length: f64, turn_angle: f64) -> Self {
        Self { length, turn_angle }
    }

    /// Length in metres.
    #[must_use]
    pub fn length_m(&self) -> f64 {
        self.length / 100.0
    }
}
