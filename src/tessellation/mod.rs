mod tessellate_shape;
mod triangulate;

pub use tessellate_shape::TessellateShape;
pub use triangulate::{triangulate_rings, PlanarTriangulation};

use crate::math::{Point2, Point3, Vector3};

/// A triangle mesh approximation of a tile, floor or ceiling.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates (surface parameters, metres).
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Appends another mesh, offsetting its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &Self) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|[a, b, c]| [a + base, b + base, c + base]));
    }

    /// Total surface area of all triangles.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.indices
            .iter()
            .map(|&[a, b, c]| {
                let p0 = self.vertices[a as usize];
                let p1 = self.vertices[b as usize];
                let p2 = self.vertices[c as usize];
                (p1 - p0).cross(&(p2 - p0)).norm() * 0.5
            })
            .sum()
    }
}
