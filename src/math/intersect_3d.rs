use crate::geometry::surface::Plane;

use super::{Point3, Vector3, TOLERANCE};

/// Relationship of a line with a plane.
#[derive(Debug)]
pub enum LinePlaneRelation {
    /// Line intersects the plane at a single point.
    Point { point: Point3, t: f64 },
    /// Line is parallel to the plane (does not intersect).
    Parallel,
    /// Line lies entirely on the plane.
    OnPlane,
}

/// Computes the intersection of a line `origin + t * dir` with a plane.
#[must_use]
pub fn line_plane_intersect(origin: &Point3, dir: &Vector3, plane: &Plane) -> LinePlaneRelation {
    let normal = plane.plane_normal();
    let denom = normal.dot(dir);

    let diff = plane.origin() - origin;
    let numer = normal.dot(&diff);

    if denom.abs() < TOLERANCE {
        // Line is parallel to the plane
        if numer.abs() < TOLERANCE {
            LinePlaneRelation::OnPlane
        } else {
            LinePlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        let point = origin + dir * t;
        LinePlaneRelation::Point { point, t }
    }
}

/// Intersects a ray (`t >= 0` half of the line) with a plane.
///
/// Returns the hit point and ray parameter, or `None` for parallel rays and
/// planes behind the ray origin.
#[must_use]
pub fn ray_plane_intersect(origin: &Point3, dir: &Vector3, plane: &Plane) -> Option<(Point3, f64)> {
    match line_plane_intersect(origin, dir, plane) {
        LinePlaneRelation::Point { point, t } if t >= 0.0 => Some((point, t)),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    fn floor() -> Plane {
        Plane::new(p(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 0.0, 1.0)).unwrap()
    }

    #[test]
    fn downward_ray_hits_floor() {
        let (hit, t) = ray_plane_intersect(&p(1.0, 2.0, 3.0), &v(0.0, -1.0, 0.0), &floor()).unwrap();
        assert!((t - 2.0).abs() < TOLERANCE);
        assert!((hit.x - 1.0).abs() < TOLERANCE);
        assert!(hit.y.abs() < TOLERANCE);
        assert!((hit.z - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn upward_ray_misses_floor() {
        assert!(ray_plane_intersect(&p(0.0, 2.0, 0.0), &v(0.0, 1.0, 0.0), &floor()).is_none());
    }

    #[test]
    fn parallel_line() {
        let r = line_plane_intersect(&p(0.0, 1.0, 0.0), &v(1.0, 0.0, 0.0), &floor());
        assert!(matches!(r, LinePlaneRelation::Parallel));
        let r = line_plane_intersect(&p(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &floor());
        assert!(matches!(r, LinePlaneRelation::OnPlane));
    }
}
