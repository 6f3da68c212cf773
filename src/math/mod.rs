pub mod distance_2d;
pub mod intersect_2d;
pub mod intersect_3d;
pub mod polygon_2d;

/// 2D point type.
///
/// Plan-space points store world `x` in `.x` and world `z` in `.y`.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type (world space, +Y up).
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit quaternion used for opening orientations.
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

/// Rigid transform (rotation + translation).
pub type Isometry3 = nalgebra::Isometry3<f64>;

/// Numerical tolerance for floating-point comparisons (parallel rays, zero vectors).
pub const TOLERANCE: f64 = 1e-10;

/// Geometric tolerance in plan units (metres) used for clipping and tiling.
pub const PLAN_EPSILON: f64 = 1e-6;

/// Lifts a plan point onto the floor plane at the given height.
#[must_use]
pub fn plan_to_world(p: &Point2, height: f64) -> Point3 {
    Point3::new(p.x, height, p.y)
}

/// Projects a world point onto the plan (drops the height).
#[must_use]
pub fn world_to_plan(p: &Point3) -> Point2 {
    Point2::new(p.x, p.z)
}
