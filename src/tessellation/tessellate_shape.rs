use crate::error::Result;
use crate::geometry::{Plane, Ring, Surface};
use crate::math::{Point2, Vector3};

use super::{triangulate_rings, TriangleMesh};

/// Tessellates a ring set lying in a plane's `(u, v)` frame.
///
/// Filled rings are counter-clockwise and holes clockwise, as produced by
/// the clip engine.
///
/// The cap faces along the plane normal, or against it when
/// [`flipped`](Self::flipped). With a thickness the shape is extruded along
/// the facing direction into a closed slab.
pub struct TessellateShape<'a> {
    rings: &'a [Ring],
    plane: &'a Plane,
    flip: bool,
    thickness: f64,
}

impl<'a> TessellateShape<'a> {
    /// Creates a new `TessellateShape` operation producing a single cap.
    #[must_use]
    pub fn new(rings: &'a [Ring], plane: &'a Plane) -> Self {
        Self {
            rings,
            plane,
            flip: false,
            thickness: 0.0,
        }
    }

    /// Faces the cap against the plane normal.
    #[must_use]
    pub fn flipped(mut self) -> Self {
        self.flip = !self.flip;
        self
    }

    /// Extrudes the shape by `thickness` along the facing direction.
    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness.max(0.0);
        self
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if the rings cannot be triangulated.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let tri = triangulate_rings(self.rings)?;
        let facing = if self.flip {
            -*self.plane.plane_normal()
        } else {
            *self.plane.plane_normal()
        };
        let lift = facing * self.thickness;

        let mut mesh = TriangleMesh::default();
        for [a, b, c] in tri.triangle_points() {
            // Triangles are counter-clockwise in (u, v), so they face along
            // the plane normal as given.
            let (b, c) = if self.flip { (c, b) } else { (b, c) };
            self.push_triangle(&mut mesh, [a, b, c], lift, facing);
        }

        if self.thickness > 0.0 {
            for [a, b, c] in tri.triangle_points() {
                let (b, c) = if self.flip { (b, c) } else { (c, b) };
                self.push_triangle(&mut mesh, [a, b, c], Vector3::zeros(), -facing);
            }
            for ring in self.rings {
                for (a, b) in ring.edges() {
                    self.push_side(&mut mesh, a, b, lift);
                }
            }
        }

        Ok(mesh)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push_triangle(&self, mesh: &mut TriangleMesh, uv: [Point2; 3], lift: Vector3, normal: Vector3) {
        let base = mesh.vertices.len() as u32;
        for p in uv {
            mesh.vertices.push(self.plane.evaluate(p.x, p.y) + lift);
            mesh.normals.push(normal);
            mesh.uvs.push(p);
        }
        mesh.indices.push([base, base + 1, base + 2]);
    }

    /// One quad of the slab side, wound to face away from the shape.
    #[allow(clippy::cast_possible_truncation)]
    fn push_side(&self, mesh: &mut TriangleMesh, a: Point2, b: Point2, lift: Vector3) {
        let a0 = self.plane.evaluate(a.x, a.y);
        let b0 = self.plane.evaluate(b.x, b.y);
        let a1 = a0 + lift;
        let b1 = b0 + lift;

        // Material lies left of every edge, so the right normal points out.
        let d = b - a;
        let outward = *self.plane.u_dir() * d.y - *self.plane.v_dir() * d.x;
        let Some(normal) = outward.try_normalize(f64::EPSILON) else {
            return;
        };

        let base = mesh.vertices.len() as u32;
        mesh.vertices.extend([a0, b0, b1, a1]);
        mesh.normals.extend([normal; 4]);
        mesh.uvs.extend([a, b, b, a]);

        let face = (b0 - a0).cross(&(a1 - a0));
        if face.dot(&normal) >= 0.0 {
            mesh.indices.push([base, base + 1, base + 2]);
            mesh.indices.push([base, base + 2, base + 3]);
        } else {
            mesh.indices.push([base, base + 2, base + 1]);
            mesh.indices.push([base, base + 3, base + 2]);
        }
    }
}
