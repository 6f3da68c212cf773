mod plane;

pub use plane::Plane;

use crate::math::{Point3, Vector3};

/// Parameter domain for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    /// Start of the U parameter range.
    pub u_min: f64,
    /// End of the U parameter range.
    pub u_max: f64,
    /// Start of the V parameter range.
    pub v_min: f64,
    /// End of the V parameter range.
    pub v_max: f64,
}

impl SurfaceDomain {
    /// Creates a new surface domain.
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// An infinite domain in both parameters.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Returns `true` if `(u, v)` lies inside the domain, widened by `eps`.
    #[must_use]
    pub fn contains(&self, u: f64, v: f64, eps: f64) -> bool {
        u >= self.u_min - eps && u <= self.u_max + eps && v >= self.v_min - eps && v <= self.v_max + eps
    }
}

/// Trait for parametric surfaces that can be picked and tiled.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`, returning the 3D point.
    fn evaluate(&self, u: f64, v: f64) -> Point3;

    /// Computes the surface normal at parameters `(u, v)`.
    fn normal(&self, u: f64, v: f64) -> Vector3;

    /// Maps a point on (or near) the surface back to its parameters.
    fn inverse(&self, point: &Point3) -> (f64, f64);

    /// Returns the parameter domain of the surface.
    fn domain(&self) -> SurfaceDomain;
}
