use super::distance_2d::point_to_line_dist;
use super::intersect_2d::cross_2d;
use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. A closing
/// duplicate vertex contributes nothing, so closed and open rings agree.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the (open, deduplicated) polygon is convex.
///
/// Collinear vertices are tolerated. Polygons with fewer than 3 vertices
/// are not convex.
#[must_use]
pub fn is_convex(points: &[Point2], eps: f64) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut positive: Option<bool> = None;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let turn = cross_2d(&(b - a), &(c - b));
        if turn.abs() <= eps * eps {
            continue;
        }
        match positive {
            None => positive = Some(turn > 0.0),
            Some(dir) if dir != (turn > 0.0) => return false,
            Some(_) => {}
        }
    }
    positive.is_some()
}

/// Even-odd point-in-polygon test. Points on the boundary may go either way.
#[must_use]
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = pj.x + (point.y - pj.y) / (pi.y - pj.y) * (pi.x - pj.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Removes consecutive duplicate vertices (within `eps`), including a
/// closing vertex equal to the first.
#[must_use]
pub fn dedup_vertices(points: &[Point2], eps: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &pt in points {
        if out.last().is_some_and(|last| (pt - last).norm() <= eps) {
            continue;
        }
        out.push(pt);
    }
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() <= eps {
        out.pop();
    }
    out
}

/// Removes vertices lying on the line through their neighbours (within `eps`).
#[must_use]
pub fn remove_collinear(points: &[Point2], eps: f64) -> Vec<Point2> {
    let mut pts = points.to_vec();
    let mut changed = true;
    while changed && pts.len() > 3 {
        changed = false;
        let n = pts.len();
        for i in 0..n {
            let prev = pts[(i + n - 1) % n];
            let next = pts[(i + 1) % n];
            if point_to_line_dist(&pts[i], &prev, &next) <= eps {
                pts.remove(i);
                changed = true;
                break;
            }
        }
    }
    pts
}

/// Rotates a closed polygon so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    if best == 0 {
        return points.to_vec();
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the segment has zero length.
pub fn segment_direction(a: &Point2, b: &Point2) -> Result<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "zero-length segment between ({}, {}) and ({}, {})",
            a.x, a.y, b.x, b.y
        ))
        .into());
    }
    Ok(d / len)
}
