use crate::math::polygon_2d::{dedup_vertices, is_convex, point_in_polygon, signed_area_2d};
use crate::math::{Point2, Vector2};

use super::Bounds2;

/// A simple polygon stored as an open ring (no closing duplicate vertex).
///
/// The last vertex implicitly connects back to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    points: Vec<Point2>,
}

impl Ring {
    /// Creates a ring, dropping consecutive duplicates and a closing vertex.
    #[must_use]
    pub fn new(points: &[Point2], eps: f64) -> Self {
        Self {
            points: dedup_vertices(points, eps),
        }
    }

    /// Wraps points that are already deduplicated and open.
    #[must_use]
    pub(crate) fn from_raw(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Counter-clockwise rectangle ring.
    #[must_use]
    pub fn from_bounds(bounds: &Bounds2) -> Self {
        Self {
            points: bounds.corners().to_vec(),
        }
    }

    /// The open vertex list.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// The vertex list with the first vertex repeated at the end.
    #[must_use]
    pub fn closed_points(&self) -> Vec<Point2> {
        let mut pts = self.points.clone();
        if let Some(&first) = pts.first() {
            pts.push(first);
        }
        pts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() >= 0.0
    }

    /// Returns the ring with counter-clockwise winding.
    #[must_use]
    pub fn into_ccw(mut self) -> Self {
        if self.signed_area() < 0.0 {
            self.points.reverse();
        }
        self
    }

    /// Returns `true` for rings that cannot enclose area larger than `eps²`.
    #[must_use]
    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.points.len() < 3 || self.area() < eps * eps
    }

    #[must_use]
    pub fn is_convex(&self, eps: f64) -> bool {
        is_convex(&self.points, eps)
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Bounds2> {
        Bounds2::from_points(&self.points)
    }

    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        point_in_polygon(p, &self.points)
    }

    /// Returns a copy shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        Self {
            points: self.points.iter().map(|p| p + offset).collect(),
        }
    }

    /// Iterates the ring's edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}
