use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// A plane in 3D space with an optional finite parameter rectangle.
///
/// Defined by an origin point, and two orthogonal direction vectors
/// (`u_dir`, `v_dir`). The normal is `u_dir × v_dir`.
///
/// Parametric form: `P(u, v) = origin + u * u_dir + v * v_dir`.
/// The floor is the plane through the world origin spanned by +X and +Z; a
/// wall is the plane through its start point spanned by its direction and +Y.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
    domain: SurfaceDomain,
}

impl Plane {
    /// Creates a new unbounded plane from an origin and two direction vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vectors are zero-length
    /// or parallel (degenerate plane).
    pub fn new(origin: Point3, u_dir: Vector3, v_dir: Vector3) -> Result<Self> {
        let u_len = u_dir.norm();
        if u_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let v_len = v_dir.norm();
        if v_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let u_dir = u_dir / u_len;
        let v_dir = v_dir / v_len;

        let normal = u_dir.cross(&v_dir);
        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(
                GeometryError::Degenerate("plane directions are parallel".into()).into(),
            );
        }
        let normal = normal / normal_len;

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
            domain: SurfaceDomain::unbounded(),
        })
    }

    /// Limits the plane to a finite parameter rectangle.
    #[must_use]
    pub fn with_domain(mut self, domain: SurfaceDomain) -> Self {
        self.domain = domain;
        self
    }

    /// The horizontal floor plane (`y = 0`), with `u = x` and `v = z`.
    #[must_use]
    pub fn floor() -> Self {
        Self {
            origin: Point3::origin(),
            u_dir: Vector3::x(),
            v_dir: Vector3::z(),
            normal: -Vector3::y(),
            domain: SurfaceDomain::unbounded(),
        }
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the normal vector of the plane.
    #[must_use]
    pub fn plane_normal(&self) -> &Vector3 {
        &self.normal
    }
}

impl Surface for Plane {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        self.origin + self.u_dir * u + self.v_dir * v
    }

    fn normal(&self, _u: f64, _v: f64) -> Vector3 {
        self.normal
    }

    fn inverse(&self, point: &Point3) -> (f64, f64) {
        let d = point - self.origin;
        (d.dot(&self.u_dir), d.dot(&self.v_dir))
    }

    fn domain(&self) -> SurfaceDomain {
        self.domain
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wall_plane_round_trip() {
        let plane = Plane::new(
            Point3::new(1.0, 0.0, 2.0),
            Vector3::new(3.0, 0.0, 4.0),
            Vector3::y(),
        )
        .unwrap();
        let pt = plane.evaluate(2.5, 1.2);
        let (u, v) = plane.inverse(&pt);
        assert!((u - 2.5).abs() < 1e-12);
        assert!((v - 1.2).abs() < 1e-12);
        assert!((pt.y - 1.2).abs() < 1e-12);
    }

    #[test]
    fn parallel_directions_rejected() {
        let r = Plane::new(Point3::origin(), Vector3::x(), Vector3::x() * 2.0);
        assert!(r.is_err());
    }

    #[test]
    fn floor_maps_u_v_to_x_z() {
        let pt = Plane::floor().evaluate(1.0, 2.0);
        assert_eq!(pt, Point3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn bounded_domain_contains() {
        let plane = Plane::floor().with_domain(SurfaceDomain::new(0.0, 1.0, 0.0, 2.0));
        assert!(plane.domain().contains(0.5, 1.5, 1e-9));
        assert!(!plane.domain().contains(1.5, 1.5, 1e-9));
    }
}
