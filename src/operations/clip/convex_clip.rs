use crate::math::intersect_2d::{segment_line_crossing, signed_side};
use crate::math::Point2;

/// Clips a ring against a convex counter-clockwise clipper (Sutherland–Hodgman).
///
/// The subject may be concave or clockwise. For concave subjects the result
/// can contain zero-width bridges running along the clipper's edges; they
/// cancel out in [`assemble_rings`](super::assemble::assemble_rings).
/// Points within `eps` of a clip edge count as inside.
#[must_use]
pub fn clip_to_convex(subject: &[Point2], clipper: &[Point2], eps: f64) -> Vec<Point2> {
    let mut output = subject.to_vec();
    let m = clipper.len();

    for k in 0..m {
        if output.is_empty() {
            break;
        }
        let a = clipper[k];
        let b = clipper[(k + 1) % m];
        let input = std::mem::take(&mut output);
        let n = input.len();

        for i in 0..n {
            let cur = input[i];
            let prev = input[(i + n - 1) % n];
            let cur_in = signed_side(&cur, &a, &b) >= -eps;
            let prev_in = signed_side(&prev, &a, &b) >= -eps;

            if cur_in {
                if !prev_in {
                    output.push(segment_line_crossing(&prev, &cur, &a, &b));
                }
                output.push(cur);
            } else if prev_in {
                output.push(segment_line_crossing(&prev, &cur, &a, &b));
            }
        }
    }

    output
}
