use serde::{Deserialize, Serialize};

use crate::math::Point2;

/// An axis-aligned rectangle in a 2D frame.
///
/// On the floor the axes are world `x` and `z`; on a wall they are the
/// wall-local `u` (distance along the wall) and `v` (height).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds2 {
    /// Creates bounds from explicit extents.
    #[must_use]
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Creates the bounds spanned by two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self::new(a.x.min(b.x), a.x.max(b.x), a.y.min(b.y), a.y.max(b.y))
    }

    /// Component-wise min/max of a point set, or `None` if it is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Self::new(first.x, first.x, first.y, first.y);
        for p in iter {
            b.min_x = b.min_x.min(p.x);
            b.max_x = b.max_x.max(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    /// Returns `true` if the interiors overlap by more than `eps` on both axes.
    #[must_use]
    pub fn overlaps(&self, other: &Self, eps: f64) -> bool {
        self.max_x > other.min_x + eps
            && self.min_x < other.max_x - eps
            && self.max_y > other.min_y + eps
            && self.min_y < other.max_y - eps
    }

    /// Returns `true` if the point lies inside the bounds, widened by `eps`.
    #[must_use]
    pub fn contains_point(&self, p: &Point2, eps: f64) -> bool {
        p.x >= self.min_x - eps && p.x <= self.max_x + eps && p.y >= self.min_y - eps && p.y <= self.max_y + eps
    }

    /// Overlapping rectangle of two bounds, or `None` if they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let b = Self::new(
            self.min_x.max(other.min_x),
            self.max_x.min(other.max_x),
            self.min_y.max(other.min_y),
            self.max_y.min(other.max_y),
        );
        (b.min_x <= b.max_x && b.min_y <= b.max_y).then_some(b)
    }

    /// The four corners in counter-clockwise order starting at the minimum.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.min_x, self.min_y),
            Point2::new(self.max_x, self.min_y),
            Point2::new(self.max_x, self.max_y),
            Point2::new(self.min_x, self.max_y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_in_any_order() {
        let b = Bounds2::from_corners(Point2::new(2.0, -1.0), Point2::new(-1.0, 3.0));
        assert_eq!(b, Bounds2::new(-1.0, 2.0, -1.0, 3.0));
        assert!((b.area() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn touching_bounds_do_not_overlap() {
        let a = Bounds2::new(0.0, 1.0, 0.0, 1.0);
        let b = Bounds2::new(1.0, 2.0, 0.0, 1.0);
        assert!(!a.overlaps(&b, 1e-6));
        assert!(a.overlaps(&Bounds2::new(0.5, 2.0, 0.5, 2.0), 1e-6));
    }

    #[test]
    fn intersection_of_disjoint_is_none() {
        let a = Bounds2::new(0.0, 1.0, 0.0, 1.0);
        assert!(a.intersection(&Bounds2::new(2.0, 3.0, 0.0, 1.0)).is_none());
        let i = a.intersection(&Bounds2::new(0.5, 3.0, -1.0, 0.5));
        assert_eq!(i, Some(Bounds2::new(0.5, 1.0, 0.0, 0.5)));
    }

    #[test]
    fn from_points_empty() {
        assert!(Bounds2::from_points(&[]).is_none());
    }
}
