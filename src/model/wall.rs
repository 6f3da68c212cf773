use serde::{Deserialize, Serialize};

/// Per-wall configuration, one entry per segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallConfig {
    /// Wall height in centimetres.
    pub height_cm: f64,
    /// Ceiling pitch in degrees, `0..=90`.
    pub pitch_deg: f64,
    /// Height in centimetres at which the pitch starts, `0..=height_cm`.
    pub pitch_start_cm: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            height_cm: 250.0,
            pitch_deg: 0.0,
            pitch_start_cm: 0.0,
        }
    }
}

impl WallConfig {
    #[must_use]
    pub fn new(height_cm: f64, pitch_deg: f64, pitch_start_cm: f64) -> Self {
        Self {
            height_cm,
            pitch_deg,
            pitch_start_cm,
        }
    }

    /// Clamps the configuration into its valid ranges.
    ///
    /// Non-finite or negative heights become zero, the pitch is clamped to
    /// `[0, 90]` and the pitch start to `[0, height_cm]`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let height_cm = if self.height_cm.is_finite() { self.height_cm.max(0.0) } else { 0.0 };
        let pitch_deg = if self.pitch_deg.is_finite() { self.pitch_deg.clamp(0.0, 90.0) } else { 0.0 };
        let pitch_start_cm = if self.pitch_start_cm.is_finite() {
            self.pitch_start_cm.clamp(0.0, height_cm)
        } else {
            0.0
        };
        Self {
            height_cm,
            pitch_deg,
            pitch_start_cm,
        }
    }

    /// Wall height in metres.
    #[must_use]
    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalized_clamps_ranges() {
        let cfg = WallConfig::new(200.0, 120.0, 300.0).normalized();
        assert!((cfg.pitch_deg - 90.0).abs() < f64::EPSILON);
        assert!((cfg.pitch_start_cm - 200.0).abs() < f64::EPSILON);

        let cfg = WallConfig::new(-5.0, -1.0, -1.0).normalized();
        assert!(cfg.height_cm.abs() < f64::EPSILON);
        assert!(cfg.pitch_deg.abs() < f64::EPSILON);
        assert!(cfg.pitch_start_cm.abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&WallConfig::default()).unwrap();
        assert!(json.contains("heightCm"));
        assert!(json.contains("pitchStartCm"));
    }
}
