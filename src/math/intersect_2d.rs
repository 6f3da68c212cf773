use super::{Point2, Vector2, TOLERANCE};

/// 2D cross product (z-component of the 3D cross product).
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let delta = p2 - p1;
    let t = cross_2d(&delta, d2) / cross;
    let u = cross_2d(&delta, d1) / cross;
    Some((t, u))
}

/// Intersects the segment `a`→`b` with the infinite line through `l0`→`l1`.
///
/// Returns the crossing point clamped onto the segment, or `a` when the
/// segment is parallel to the line.
#[must_use]
pub fn segment_line_crossing(a: &Point2, b: &Point2, l0: &Point2, l1: &Point2) -> Point2 {
    let da = b - a;
    let dl = l1 - l0;
    match line_line_intersect_2d(a, &da, l0, &dl) {
        Some((t, _)) => a + da * t.clamp(0.0, 1.0),
        None => *a,
    }
}

/// Signed side of `p` relative to the directed line `a`→`b`, normalised by
/// the line length so the value is a distance.
///
/// Positive on the left (counter-clockwise side), negative on the right.
#[must_use]
pub fn signed_side(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return 0.0;
    }
    cross_2d(&d, &(p - a)) / len
}
