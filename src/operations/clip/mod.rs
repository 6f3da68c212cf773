mod assemble;
mod convex_clip;
mod unite;

pub use assemble::assemble_rings;
pub use convex_clip::clip_to_convex;
pub use unite::UnitePolygons;

use crate::geometry::Ring;
use crate::math::{Point2, PLAN_EPSILON};
use crate::tessellation::triangulate_rings;

/// Computes the intersection of two or more polygons.
///
/// Input rings may have any winding. The result is a set of rings covering
/// exactly the area common to every input: empty when there is no overlap,
/// several rings when the overlap is disconnected. Filled rings are
/// counter-clockwise; clockwise rings are holes, which only arise when two
/// concave inputs are intersected.
///
/// Convex inputs are applied with Sutherland–Hodgman clipping. A concave
/// clipper is first split into triangles and the subject is clipped against
/// each; the fragments are merged back into rings by cancelling shared
/// edges.
pub struct IntersectPolygons<'a> {
    rings: &'a [Ring],
    eps: f64,
}

impl<'a> IntersectPolygons<'a> {
    /// Creates a new `IntersectPolygons` operation with the default plan epsilon.
    #[must_use]
    pub fn new(rings: &'a [Ring]) -> Self {
        Self {
            rings,
            eps: PLAN_EPSILON,
        }
    }

    /// Overrides the geometric tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Executes the intersection.
    #[must_use]
    pub fn execute(&self) -> Vec<Ring> {
        let eps = self.eps;
        let mut rings: Vec<Ring> = self
            .rings
            .iter()
            .map(|r| Ring::new(r.points(), eps).into_ccw())
            .collect();

        if rings.is_empty() || rings.iter().any(|r| r.is_degenerate(eps)) {
            return Vec::new();
        }
        if !bounds_overlap(&rings, eps) {
            return Vec::new();
        }

        // Concave rings first so one of them becomes the subject, then every
        // convex clipper, then any remaining concave clippers.
        rings.sort_by_key(|r| r.is_convex(eps));
        let subject = rings.remove(0);
        let (convex, concave): (Vec<Ring>, Vec<Ring>) = rings.into_iter().partition(|r| r.is_convex(eps));

        let mut shape = vec![subject];
        for clipper in convex.iter().chain(concave.iter()) {
            shape = clip_shape(&shape, clipper, eps);
            if shape.is_empty() {
                break;
            }
        }

        // A lone subject still goes through the assembler so the output is
        // normalized the same way as clipped output.
        if self.rings.len() == 1 {
            shape = assemble_rings(&ring_edges(&shape), eps);
        }
        shape
    }
}

/// Returns `true` if the polygons share any area larger than the tolerance.
#[must_use]
pub fn intersects(rings: &[Ring]) -> bool {
    !IntersectPolygons::new(rings).execute().is_empty()
}

/// Intersects a ring set with one clipper ring.
fn clip_shape(shape: &[Ring], clipper: &Ring, eps: f64) -> Vec<Ring> {
    let pieces: Vec<Vec<Point2>> = if clipper.is_convex(eps) {
        vec![clipper.points().to_vec()]
    } else {
        match triangulate_rings(std::slice::from_ref(clipper)) {
            Ok(mesh) => mesh.triangle_points().map(|t| t.to_vec()).collect(),
            Err(err) => {
                tracing::warn!(%err, "could not decompose clip polygon, treating as empty");
                return Vec::new();
            }
        }
    };

    let mut edges = Vec::new();
    for piece in &pieces {
        for ring in shape {
            let clipped = clip_to_convex(ring.points(), piece, eps);
            let n = clipped.len();
            edges.extend((0..n).map(|i| (clipped[i], clipped[(i + 1) % n])));
        }
    }
    assemble_rings(&edges, eps)
}

fn ring_edges(shape: &[Ring]) -> Vec<(Point2, Point2)> {
    shape.iter().flat_map(Ring::edges).collect()
}

/// Pairwise bounding-box rejection.
fn bounds_overlap(rings: &[Ring], eps: f64) -> bool {
    let bounds: Vec<_> = rings.iter().filter_map(Ring::bounds).collect();
    if bounds.len() != rings.len() {
        return false;
    }
    for (i, a) in bounds.iter().enumerate() {
        for b in &bounds[i + 1..] {
            if !a.overlaps(b, eps) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geometry::Bounds2;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn rect(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Ring {
        Ring::from_bounds(&Bounds2::new(min_x, max_x, min_y, max_y))
    }

    fn l_shape() -> Ring {
        Ring::new(
            &[p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(1.0, 1.0), p(1.0, 2.0), p(0.0, 2.0)],
            1e-9,
        )
    }

    fn u_shape() -> Ring {
        Ring::new(
            &[
                p(0.0, 0.0),
                p(3.0, 0.0),
                p(3.0, 2.0),
                p(2.0, 2.0),
                p(2.0, 1.0),
                p(1.0, 1.0),
                p(1.0, 2.0),
                p(0.0, 2.0),
            ],
            1e-9,
        )
    }

    fn total_area(rings: &[Ring]) -> f64 {
        rings.iter().map(Ring::signed_area).sum()
    }

    #[test]
    fn self_intersection_is_identity() {
        let a = l_shape();
        let result = IntersectPolygons::new(&[a.clone(), a.clone()]).execute();
        assert_eq!(result.len(), 1);
        assert_abs_diff_eq!(total_area(&result), a.area(), epsilon = 1e-9);
        assert_eq!(result[0].len(), a.len());
        for pt in a.points() {
            assert!(result[0].points().iter().any(|q| (q - pt).norm() < 1e-9));
        }
    }

    #[test]
    fn convex_self_intersection_is_identity() {
        let a = rect(0.0, 1.0, 0.0, 2.0);
        let result = IntersectPolygons::new(&[a.clone(), a.clone()]).execute();
        assert_eq!(result.len(), 1);
        assert_abs_diff_eq!(total_area(&result), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn disjoint_bounds_are_empty() {
        let result = IntersectPolygons::new(&[rect(0.0, 1.0, 0.0, 1.0), rect(2.0, 3.0, 0.0, 1.0)]).execute();
        assert!(result.is_empty());
    }

    #[test]
    fn touching_edges_are_empty() {
        assert!(!intersects(&[rect(0.0, 1.0, 0.0, 1.0), rect(1.0, 2.0, 0.0, 1.0)]));
    }

    #[test]
    fn winding_does_not_matter() {
        let cw = Ring::new(&[p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0), p(2.0, 0.0)], 1e-9);
        let result = IntersectPolygons::new(&[cw, rect(1.0, 3.0, 1.0, 3.0)]).execute();
        assert_eq!(result.len(), 1);
        assert!(result[0].is_ccw());
        assert_abs_diff_eq!(result[0].area(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn tile_in_notch_of_l_shape() {
        // Tile straddling the inner corner of the L: three quarters are inside.
        let result = IntersectPolygons::new(&[rect(0.5, 1.5, 0.5, 1.5), l_shape()]).execute();
        assert_eq!(result.len(), 1);
        assert_abs_diff_eq!(total_area(&result), 0.75, epsilon = 1e-9);
        assert_eq!(result[0].len(), 6);
    }

    #[test]
    fn tile_fully_in_notch_is_empty() {
        assert!(!intersects(&[rect(1.2, 1.8, 1.2, 1.8), l_shape()]));
    }

    #[test]
    fn tile_across_u_arms_splits_in_two() {
        let result = IntersectPolygons::new(&[rect(0.5, 2.5, 1.5, 1.8), u_shape()]).execute();
        assert_eq!(result.len(), 2);
        assert_abs_diff_eq!(total_area(&result), 2.0 * 0.5 * 0.3, epsilon = 1e-9);
    }

    #[test]
    fn three_way_intersection() {
        let result = IntersectPolygons::new(&[
            rect(0.0, 1.0, 0.0, 1.0),
            l_shape(),
            rect(0.5, 5.0, -1.0, 0.25),
        ])
        .execute();
        assert_eq!(result.len(), 1);
        assert_abs_diff_eq!(total_area(&result), 0.5 * 0.25, epsilon = 1e-9);
    }

    #[test]
    fn two_concave_polygons() {
        // Every part of the L lies inside the U, so the intersection is the L.
        let result = IntersectPolygons::new(&[u_shape(), l_shape()]).execute();
        assert_abs_diff_eq!(total_area(&result), 3.0, epsilon = 1e-9);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 6);
    }

    #[test]
    fn two_concave_polygons_partial_overlap() {
        // Shift the L right by 1.5: its vertical arm lands in the U's notch.
        let shifted = l_shape().translated(crate::math::Vector2::new(1.5, 0.0));
        let result = IntersectPolygons::new(&[u_shape(), shifted]).execute();
        // Bottom bar [1.5,3]x[0,1] is inside the U; the arm [1.5,2.5]x[1,2]
        // only overlaps the right arm [2,3]x[1,2] over [2,2.5]x[1,2].
        assert_abs_diff_eq!(total_area(&result), 1.5 + 0.5, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_input_is_empty() {
        let line = Ring::new(&[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)], 1e-9);
        assert!(IntersectPolygons::new(&[line, rect(0.0, 2.0, -1.0, 1.0)]).execute().is_empty());
        assert!(IntersectPolygons::new(&[]).execute().is_empty());
    }

    #[test]
    fn sliver_overlap_is_dropped() {
        let result = IntersectPolygons::new(&[rect(0.0, 1.0, 0.0, 1.0), rect(0.999_999_9, 2.0, 0.0, 1.0)]).execute();
        assert!(result.is_empty());
    }
}
