use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::{Result, TessellationError};
use crate::geometry::Ring;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangles covering a ring set, in the rings' own 2D frame.
#[derive(Debug, Clone, Default)]
pub struct PlanarTriangulation {
    pub vertices: Vec<Point2>,
    /// Counter-clockwise vertex index triples.
    pub triangles: Vec<[usize; 3]>,
}

impl PlanarTriangulation {
    /// Iterates the triangles as point triples.
    pub fn triangle_points(&self) -> impl Iterator<Item = [Point2; 3]> + '_ {
        self.triangles
            .iter()
            .map(|&[a, b, c]| [self.vertices[a], self.vertices[b], self.vertices[c]])
    }

    /// Sum of the triangle areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangle_points().map(|t| signed_area_2d(&t)).sum()
    }
}

/// Triangulates the area enclosed by a set of rings.
///
/// Every ring edge becomes a constraint of a constrained Delaunay
/// triangulation. Faces are kept by crossing parity, so a ring nested in
/// another ring cuts a hole. Winding is ignored.
///
/// # Errors
///
/// Returns an error if a ring has fewer than 3 points or a vertex cannot be
/// inserted (non-finite coordinates).
pub fn triangulate_rings(rings: &[Ring]) -> Result<PlanarTriangulation> {
    let mut cdt = Cdt::new();
    for ring in rings {
        insert_constraint_loop(&mut cdt, ring.points())?;
    }

    let interior = classify_interior_faces(&cdt);

    let mut out = PlanarTriangulation::default();
    let mut vertex_map: HashMap<usize, usize> = HashMap::new();
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let mut tri = [0usize; 3];
        for (slot, vh) in tri.iter_mut().zip(face.vertices()) {
            *slot = *vertex_map.entry(vh.fix().index()).or_insert_with(|| {
                let pos = vh.position();
                out.vertices.push(Point2::new(pos.x, pos.y));
                out.vertices.len() - 1
            });
        }
        let pts = [out.vertices[tri[0]], out.vertices[tri[1]], out.vertices[tri[2]]];
        if signed_area_2d(&pts) < 0.0 {
            tri.swap(1, 2);
        }
        out.triangles.push(tri);
    }

    Ok(out)
}

fn insert_constraint_loop(cdt: &mut Cdt, points: &[Point2]) -> Result<()> {
    if points.len() < 3 {
        return Err(TessellationError::InvalidInput("constraint loop needs at least 3 points".into()).into());
    }

    let mut handles = Vec::with_capacity(points.len());
    for p in points {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        // Crossing constraints only occur for self-intersecting input.
        if from != to && cdt.can_add_constraint(from, to) {
            cdt.add_constraint(from, to);
        }
    }

    Ok(())
}

/// Flood fill from the convex hull; every constraint crossed flips parity.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let next = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, next);
            if next % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((neighbor.fix(), next));
        }
    }

    interior
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

    #[test]
    fn square_gives_two_triangles() {
        let ring = Ring::from_bounds(&Bounds2::new(0.0, 1.0, 0.0, 1.0));
        let tri = triangulate_rings(&[ring]).unwrap();
        assert_eq!(tri.triangles.len(), 2);
        assert_abs_diff_eq!(tri.area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn concave_ring_excludes_notch() {
        let l = Ring::new(
            &[p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(1.0, 1.0), p(1.0, 2.0), p(0.0, 2.0)],
            1e-9,
        );
        let tri = triangulate_rings(&[l]).unwrap();
        assert_eq!(tri.triangles.len(), 4);
        assert_abs_diff_eq!(tri.area(), 3.0, epsilon = 1e-12);
        for t in tri.triangle_points() {
            assert!(signed_area_2d(&t) > 0.0);
        }
    }

    #[test]
    fn nested_ring_cuts_hole() {
        let outer = Ring::from_bounds(&Bounds2::new(0.0, 4.0, 0.0, 4.0));
        let hole = Ring::new(&[p(1.0, 1.0), p(1.0, 3.0), p(3.0, 3.0), p(3.0, 1.0)], 1e-9);
        let tri = triangulate_rings(&[outer, hole]).unwrap();
        assert_abs_diff_eq!(tri.area(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn short_ring_is_rejected() {
        let ring = Ring::new(&[p(0.0, 0.0), p(1.0, 0.0)], 1e-9);
        assert!(triangulate_rings(&[ring]).is_err());
    }
}
