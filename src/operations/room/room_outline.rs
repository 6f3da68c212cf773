use crate::geometry::{Bounds2, Ring};
use crate::math::{Point2, PLAN_EPSILON};

/// The room's floor outline: a counter-clockwise polygon with its bounds.
#[derive(Debug, Clone)]
pub struct RoomOutline {
    ring: Ring,
    bounds: Bounds2,
    eps: f64,
}

impl RoomOutline {
    /// Builds the outline from a path, normalizing winding to counter-clockwise.
    ///
    /// Open paths are accepted as-is and implicitly closed. An empty path
    /// yields a degenerate outline with zero-size bounds at the origin.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        Self::with_epsilon(points, PLAN_EPSILON)
    }

    /// Like [`from_points`](Self::from_points), merging vertices and judging
    /// degeneracy with `eps`.
    #[must_use]
    pub fn with_epsilon(points: &[Point2], eps: f64) -> Self {
        let ring = Ring::new(points, eps).into_ccw();
        let bounds = Bounds2::from_points(points).unwrap_or_else(|| Bounds2::new(0.0, 0.0, 0.0, 0.0));
        Self { ring, bounds, eps }
    }

    /// The polygon as an open counter-clockwise ring.
    #[must_use]
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// The polygon as a closed vertex list (first == last).
    #[must_use]
    pub fn polygon(&self) -> Vec<Point2> {
        self.ring.closed_points()
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    /// Midpoint of the bounding box, the shared origin for floor and ceiling meshes.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.bounds.center()
    }

    /// The outline translated so that [`center`](Self::center) is the origin.
    #[must_use]
    pub fn centered(&self) -> Ring {
        self.ring.translated(-self.center().coords)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.ring.area()
    }

    /// Returns `true` if the outline encloses no usable floor area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.ring.is_degenerate(self.eps)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::polygon_2d::signed_area_2d;
    use crate::model::Segment;
    use crate::operations::path::BuildPath;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn square_room_bounds() {
        let segs = [
            Segment::new(100.0, 0.0),
            Segment::new(100.0, 90.0),
            Segment::new(100.0, 180.0),
            Segment::new(100.0, 270.0),
        ];
        let outline = RoomOutline::from_points(&BuildPath::new(&segs).execute());
        let b = outline.bounds();
        assert_abs_diff_eq!(b.min_x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max_x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.min_y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max_y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(outline.area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn clockwise_input_is_normalized() {
        let cw = [p(0.0, 0.0), p(0.0, 2.0), p(3.0, 2.0), p(3.0, 0.0), p(0.0, 0.0)];
        let outline = RoomOutline::from_points(&cw);
        let polygon = outline.polygon();
        assert!(signed_area_2d(&polygon) > 0.0);
        assert_eq!(polygon.first(), polygon.last());
    }

    #[test]
    fn open_path_is_closed() {
        let open = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0)];
        let polygon = RoomOutline::from_points(&open).polygon();
        assert_eq!(polygon.len(), 4);
        assert_eq!(polygon[0], polygon[3]);
    }

    #[test]
    fn centered_shape_is_around_origin() {
        let outline = RoomOutline::from_points(&[p(2.0, 4.0), p(6.0, 4.0), p(6.0, 6.0), p(2.0, 6.0)]);
        assert_abs_diff_eq!(outline.center().x, 4.0);
        assert_abs_diff_eq!(outline.center().y, 5.0);
        let b = outline.centered().bounds().unwrap();
        assert_abs_diff_eq!(b.min_x, -2.0);
        assert_abs_diff_eq!(b.max_y, 1.0);
    }

    #[test]
    fn epsilon_decides_degeneracy() {
        // 5 mm square: 2.5e-5 m² is above 1e-6² but below 0.01².
        let tiny = [p(0.0, 0.0), p(0.005, 0.0), p(0.005, 0.005), p(0.0, 0.005)];
        assert!(!RoomOutline::from_points(&tiny).is_degenerate());
        assert!(RoomOutline::with_epsilon(&tiny, 0.01).is_degenerate());
    }

    #[test]
    fn empty_path_is_degenerate() {
        let outline = RoomOutline::from_points(&[]);
        assert!(outline.is_degenerate());
        assert_abs_diff_eq!(outline.bounds().area(), 0.0);
    }
}
