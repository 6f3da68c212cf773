use crate::math::Point2;
use crate::model::Segment;

/// Turns an ordered list of segments into plan-space points.
///
/// The path starts at the origin. Each segment advances the current point by
/// its length (converted from centimetres to metres) along its absolute
/// heading. The path is not closed automatically.
pub struct BuildPath<'a> {
    segments: &'a [Segment],
}

impl<'a> BuildPath<'a> {
    /// Creates a new `BuildPath` operation.
    #[must_use]
    pub fn new(segments: &'a [Segment]) -> Self {
        Self { segments }
    }

    /// Executes the path construction, returning `segments.len() + 1` points.
    ///
    /// Segments with a non-finite length or heading do not move the pen.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let mut points = Vec::with_capacity(self.segments.len() + 1);
        let mut current = Point2::origin();
        points.push(current);

        for seg in self.segments {
            let length = seg.length_m();
            let rad = seg.turn_angle.to_radians();
            if length.is_finite() && rad.is_finite() {
                current = Point2::new(current.x + length * rad.cos(), current.y + length * rad.sin());
            }
            points.push(current);
        }

        points
    }
}
