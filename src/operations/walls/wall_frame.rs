use crate::geometry::{Plane, SurfaceDomain};
use crate::math::polygon_2d::segment_direction;
use crate::math::{Point2, Point3, UnitQuaternion, Vector2, Vector3};

/// Geometry of one wall: the straight run between two consecutive path points.
///
/// The wall-local frame has `u` running from `start` towards `end` and `v`
/// pointing up.
#[derive(Debug, Clone, PartialEq)]
pub struct WallFrame {
    pub index: usize,
    pub start: Point2,
    pub end: Point2,
    /// Unit direction from start to end, `None` for a zero-length wall.
    pub direction: Option<Vector2>,
    /// Length in metres.
    pub length: f64,
}

impl WallFrame {
    /// Builds one frame per consecutive pair of path points.
    #[must_use]
    pub fn from_path(points: &[Point2]) -> Vec<Self> {
        points
            .windows(2)
            .enumerate()
            .map(|(index, pair)| Self::new(index, pair[0], pair[1]))
            .collect()
    }

    #[must_use]
    pub fn new(index: usize, start: Point2, end: Point2) -> Self {
        Self {
            index,
            start,
            end,
            direction: segment_direction(&start, &end).ok(),
            length: (end - start).norm(),
        }
    }

    /// The wall vector `end - start`.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// Rotation about +Y that turns +X onto the wall direction: `-atan2(dz, dx)`.
    #[must_use]
    pub fn yaw(&self) -> f64 {
        let d = self.vector();
        -d.y.atan2(d.x)
    }

    /// The wall's base orientation as a quaternion.
    #[must_use]
    pub fn base_orientation(&self) -> UnitQuaternion {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw())
    }

    /// Plan point at distance `u` along the wall.
    #[must_use]
    pub fn plan_point(&self, u: f64) -> Point2 {
        match self.direction {
            Some(dir) => self.start + dir * u,
            None => self.start,
        }
    }

    /// World point at wall-local `(u, v)`.
    #[must_use]
    pub fn world_point(&self, u: f64, v: f64) -> Point3 {
        let p = self.plan_point(u);
        Point3::new(p.x, v, p.y)
    }

    /// The vertical plane of the wall, bounded to `[0, length] × [0, height]`.
    ///
    /// Returns `None` for zero-length walls.
    #[must_use]
    pub fn plane(&self, height: f64) -> Option<Plane> {
        let dir = self.direction?;
        let origin = Point3::new(self.start.x, 0.0, self.start.y);
        let plane = Plane::new(origin, Vector3::new(dir.x, 0.0, dir.y), Vector3::y()).ok()?;
        Some(plane.with_domain(SurfaceDomain::new(0.0, self.length, 0.0, height)))
    }
}
