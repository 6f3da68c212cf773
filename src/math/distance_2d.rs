use super::Point2;

/// Returns the parameter `t` of the orthogonal projection of `p` onto the
/// infinite line through `a` and `b` (`0` at `a`, `1` at `b`).
///
/// Returns `0` for a degenerate (zero-length) segment.
#[must_use]
pub fn projection_param(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < 1e-20 {
        return 0.0;
    }
    (p - a).dot(&d) / len_sq
}

/// Returns the minimum distance from point `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let t = projection_param(p, a, b).clamp(0.0, 1.0);
    let closest = a + (b - a) * t;
    (p - closest).norm()
}

/// Returns the distance from `p` to the infinite line through `a` and `b`.
///
/// Falls back to the point distance for a degenerate line.
#[must_use]
pub fn point_to_line_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < 1e-10 {
        return (p - a).norm();
    }
    let w = p - a;
    (d.x * w.y - d.y * w.x).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(&p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(&p(-1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        let d = point_to_segment_dist(&p(3.0, 4.0), &p(0.0, 0.0), &p(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn line_dist_ignores_segment_extent() {
        let d = point_to_line_dist(&p(10.0, 2.0), &p(0.0, 0.0), &p(1.0, 0.0));
        assert!((d - 2.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn projection_param_midpoint() {
        let t = projection_param(&p(1.0, 5.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((t - 0.5).abs() < TOL);
    }
}
