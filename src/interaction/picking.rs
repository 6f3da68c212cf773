use crate::geometry::{Plane, Ray, Ring, Surface};
use crate::math::intersect_3d::ray_plane_intersect;
use crate::math::{world_to_plan, Point2, Point3, PLAN_EPSILON};
use crate::model::WallConfig;
use crate::operations::room::RoomOutline;
use crate::operations::walls::WallFrame;

use super::DragMode;

/// Where a pick ray met the room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceHit {
    Floor { point: Point3 },
    /// `u` runs along the wall from its start, `v` is the height.
    Wall { wall_index: usize, u: f64, v: f64, point: Point3 },
}

impl SurfaceHit {
    #[must_use]
    pub fn point(&self) -> Point3 {
        match self {
            Self::Floor { point } | Self::Wall { point, .. } => *point,
        }
    }

    /// The drag mode a gesture starting at this hit would use.
    #[must_use]
    pub fn mode(&self) -> DragMode {
        match self {
            Self::Floor { .. } => DragMode::Floor,
            Self::Wall { wall_index, .. } => DragMode::Wall {
                wall_index: *wall_index,
            },
        }
    }

    /// Coordinates in the hit surface's own 2D frame: `(x, z)` or `(u, v)`.
    #[must_use]
    pub fn surface_point(&self) -> Point2 {
        match self {
            Self::Floor { point } => world_to_plan(point),
            Self::Wall { u, v, .. } => Point2::new(*u, *v),
        }
    }
}

struct WallSurface {
    index: usize,
    plane: Plane,
}

/// Intersects pick rays with the floor and the wall planes of a room.
pub struct SurfacePicker {
    floor: Plane,
    outline: Ring,
    walls: Vec<WallSurface>,
    eps: f64,
}

impl SurfacePicker {
    /// Builds the picker. Zero-length walls cannot be picked.
    #[must_use]
    pub fn new(outline: &RoomOutline, frames: &[WallFrame], walls: &[WallConfig]) -> Self {
        let walls = frames
            .iter()
            .filter_map(|frame| {
                let height = walls.get(frame.index).copied().unwrap_or_default().normalized().height_m();
                frame.plane(height).map(|plane| WallSurface {
                    index: frame.index,
                    plane,
                })
            })
            .collect();
        Self {
            floor: Plane::floor(),
            outline: outline.ring().clone(),
            walls,
            eps: PLAN_EPSILON,
        }
    }

    /// Overrides the tolerance used to accept hits at a wall's edges.
    #[must_use]
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Nearest hit on the floor inside the room or on a wall inside its extent.
    #[must_use]
    pub fn pick(&self, ray: &Ray) -> Option<SurfaceHit> {
        let mut best: Option<(f64, SurfaceHit)> = None;
        let mut consider = |t: f64, hit: SurfaceHit| {
            if best.is_none_or(|(bt, _)| t < bt) {
                best = Some((t, hit));
            }
        };

        if let Some((point, t)) = ray_plane_intersect(&ray.origin, &ray.direction, &self.floor) {
            if self.outline.contains_point(&world_to_plan(&point)) {
                consider(t, SurfaceHit::Floor { point });
            }
        }
        for wall in &self.walls {
            if let Some((t, hit)) = self.hit_wall(wall, ray, true) {
                consider(t, hit);
            }
        }

        best.map(|(_, hit)| hit)
    }

    /// Hit on the unbounded floor plane.
    #[must_use]
    pub fn floor_hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        ray_plane_intersect(&ray.origin, &ray.direction, &self.floor).map(|(point, _)| SurfaceHit::Floor { point })
    }

    /// Hit on the unbounded plane of one wall.
    #[must_use]
    pub fn wall_hit(&self, ray: &Ray, wall_index: usize) -> Option<SurfaceHit> {
        let wall = self.walls.iter().find(|w| w.index == wall_index)?;
        self.hit_wall(wall, ray, false).map(|(_, hit)| hit)
    }

    /// Hit on the surface a drag in `mode` is bound to.
    #[must_use]
    pub fn hit_for_mode(&self, ray: &Ray, mode: DragMode) -> Option<SurfaceHit> {
        match mode {
            DragMode::Floor => self.floor_hit(ray),
            DragMode::Wall { wall_index } => self.wall_hit(ray, wall_index),
        }
    }

    /// Intersects one wall plane, optionally rejecting hits outside the wall.
    fn hit_wall(&self, wall: &WallSurface, ray: &Ray, bounded: bool) -> Option<(f64, SurfaceHit)> {
        let (point, t) = ray_plane_intersect(&ray.origin, &ray.direction, &wall.plane)?;
        let (u, v) = wall.plane.inverse(&point);
        if bounded && !wall.plane.domain().contains(u, v, self.eps) {
            return None;
        }
        Some((
            t,
            SurfaceHit::Wall {
                wall_index: wall.index,
                u,
                v,
                point,
            },
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::Vector3;

    fn square_room() -> (RoomOutline, Vec<WallFrame>) {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
            Point2::new(0.0, 0.0),
        ];
        (RoomOutline::from_points(&points), WallFrame::from_path(&points))
    }

    fn picker() -> SurfacePicker {
        let (outline, frames) = square_room();
        SurfacePicker::new(&outline, &frames, &[WallConfig::default(); 4])
    }

    #[test]
    fn ray_from_above_hits_floor() {
        let ray = Ray::new(Point3::new(1.0, 5.0, 2.0), -Vector3::y());
        let hit = picker().pick(&ray).unwrap();
        assert_eq!(hit.mode(), DragMode::Floor);
        let sp = hit.surface_point();
        assert_abs_diff_eq!(sp.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sp.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn horizontal_ray_hits_nearest_wall() {
        // From the room centre towards +x: the wall at x = 4 (index 1).
        let ray = Ray::new(Point3::new(2.0, 1.2, 1.5), Vector3::x());
        let hit = picker().pick(&ray).unwrap();
        match hit {
            SurfaceHit::Wall { wall_index, u, v, .. } => {
                assert_eq!(wall_index, 1);
                assert_abs_diff_eq!(u, 1.5, epsilon = 1e-12);
                assert_abs_diff_eq!(v, 1.2, epsilon = 1e-12);
            }
            SurfaceHit::Floor { .. } => panic!("expected a wall hit"),
        }
    }

    #[test]
    fn ray_above_walls_misses() {
        let ray = Ray::new(Point3::new(2.0, 3.0, 2.0), Vector3::x());
        assert!(picker().pick(&ray).is_none());
        // The unbounded wall plane is still hit.
        assert!(picker().wall_hit(&ray, 1).is_some());
    }

    #[test]
    fn edge_tolerance_follows_epsilon() {
        // 5 mm above the 2.5 m wall top.
        let ray = Ray::new(Point3::new(2.0, 2.505, 1.5), Vector3::x());
        assert!(picker().pick(&ray).is_none());
        let hit = picker().with_epsilon(0.01).pick(&ray).unwrap();
        assert_eq!(hit.mode(), DragMode::Wall { wall_index: 1 });
    }

    #[test]
    fn floor_hit_outside_room_needs_unbounded_plane() {
        let ray = Ray::new(Point3::new(9.0, 5.0, 9.0), -Vector3::y());
        let p = picker();
        assert!(p.pick(&ray).is_none());
        assert!(p.floor_hit(&ray).is_some());
        assert!(p.hit_for_mode(&ray, DragMode::Floor).is_some());
    }

    #[test]
    fn upward_ray_from_floor_misses_floor() {
        let ray = Ray::new(Point3::new(2.0, 1.0, 2.0), Vector3::y());
        assert!(picker().floor_hit(&ray).is_none());
    }
}
