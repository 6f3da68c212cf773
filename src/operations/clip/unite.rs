use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use crate::error::{Result, TessellationError};
use crate::geometry::Ring;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2, PLAN_EPSILON};

use super::assemble_rings;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Computes the union of two ring sets.
///
/// Each input is read by crossing parity, so clockwise holes nested in a
/// filled ring are honoured. Every edge of both inputs becomes a constraint
/// (split where edges cross); triangles whose centroid lies in either input
/// are kept and merged back into rings by the edge assembler.
pub struct UnitePolygons<'a> {
    a: &'a [Ring],
    b: &'a [Ring],
    eps: f64,
}

impl<'a> UnitePolygons<'a> {
    /// Creates a new `UnitePolygons` operation with the default plan epsilon.
    #[must_use]
    pub fn new(a: &'a [Ring], b: &'a [Ring]) -> Self {
        Self {
            a,
            b,
            eps: PLAN_EPSILON,
        }
    }

    #[must_use]
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Executes the union.
    ///
    /// # Errors
    ///
    /// Returns an error if a vertex cannot be inserted (non-finite coordinates).
    pub fn execute(&self) -> Result<Vec<Ring>> {
        let eps = self.eps;
        let a: Vec<&Ring> = self.a.iter().filter(|r| !r.is_degenerate(eps)).collect();
        let b: Vec<&Ring> = self.b.iter().filter(|r| !r.is_degenerate(eps)).collect();

        let mut cdt = Cdt::new();
        for ring in a.iter().chain(&b) {
            insert_split_loop(&mut cdt, ring.points())?;
        }

        let mut edges = Vec::new();
        for face in cdt.inner_faces() {
            let [p, q, r] = face.vertices().map(|v| {
                let pos = v.position();
                Point2::new(pos.x, pos.y)
            });
            let area = signed_area_2d(&[p, q, r]);
            if area.abs() < eps * eps {
                continue;
            }
            let centroid = Point2::from((p.coords + q.coords + r.coords) / 3.0);
            if !inside(&a, &centroid) && !inside(&b, &centroid) {
                continue;
            }
            let (q, r) = if area < 0.0 { (r, q) } else { (q, r) };
            edges.extend([(p, q), (q, r), (r, p)]);
        }

        Ok(assemble_rings(&edges, eps))
    }
}

fn insert_split_loop(cdt: &mut Cdt, points: &[Point2]) -> Result<()> {
    let mut handles = Vec::with_capacity(points.len());
    for p in points {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }
    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint_and_split(from, to, |p| p);
        }
    }
    Ok(())
}

/// Parity point-in-shape test.
fn inside(rings: &[&Ring], p: &Point2) -> bool {
    rings.iter().filter(|r| r.contains_point(p)).count() % 2 == 1
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geometry::Bounds2;

    fn rect(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Ring {
        Ring::from_bounds(&Bounds2::new(min_x, max_x, min_y, max_y))
    }

    fn total_area(rings: &[Ring]) -> f64 {
        rings.iter().map(Ring::signed_area).sum()
    }

    #[test]
    fn adjoining_halves_join_into_one_ring() {
        let left = [rect(0.3, 0.45, 0.0, 0.3)];
        let right = [rect(0.45, 0.6, 0.0, 0.3)];
        let result = UnitePolygons::new(&left, &right).execute().unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 4);
        assert_abs_diff_eq!(total_area(&result), 0.09, epsilon = 1e-12);
    }

    #[test]
    fn overlapping_rects_count_shared_area_once() {
        let result = UnitePolygons::new(&[rect(0.0, 2.0, 0.0, 1.0)], &[rect(1.0, 3.0, 0.5, 1.5)])
            .execute()
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 8);
        assert_abs_diff_eq!(total_area(&result), 3.5, epsilon = 1e-9);
    }

    #[test]
    fn contained_shape_changes_nothing() {
        let outer = [rect(0.0, 1.0, 0.0, 1.0)];
        let result = UnitePolygons::new(&outer, &[rect(0.2, 0.4, 0.2, 0.4)]).execute().unwrap();
        assert_eq!(result.len(), 1);
        assert_abs_diff_eq!(total_area(&result), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn disjoint_shapes_stay_separate() {
        let result = UnitePolygons::new(&[rect(0.0, 1.0, 0.0, 1.0)], &[rect(2.0, 3.0, 0.0, 1.0)])
            .execute()
            .unwrap();
        assert_eq!(result.len(), 2);
        assert_abs_diff_eq!(total_area(&result), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn hole_is_kept_unless_filled() {
        let frame = [
            rect(0.0, 3.0, 0.0, 3.0),
            Ring::new(
                &[
                    Point2::new(1.0, 1.0),
                    Point2::new(1.0, 2.0),
                    Point2::new(2.0, 2.0),
                    Point2::new(2.0, 1.0),
                ],
                1e-9,
            ),
        ];
        let partly = UnitePolygons::new(&frame, &[rect(1.0, 1.5, 1.0, 2.0)]).execute().unwrap();
        assert_abs_diff_eq!(total_area(&partly), 8.5, epsilon = 1e-9);

        let filled = UnitePolygons::new(&frame, &[rect(1.0, 2.0, 1.0, 2.0)]).execute().unwrap();
        assert_eq!(filled.len(), 1);
        assert_abs_diff_eq!(total_area(&filled), 9.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_side_returns_other() {
        let result = UnitePolygons::new(&[], &[rect(0.0, 1.0, 0.0, 1.0)]).execute().unwrap();
        assert_eq!(result.len(), 1);
        assert_abs_diff_eq!(total_area(&result), 1.0, epsilon = 1e-12);
    }
}
