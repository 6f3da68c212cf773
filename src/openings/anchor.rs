use crate::math::{plan_to_world, Point3, UnitQuaternion};
use crate::model::Opening;
use crate::operations::walls::WallFrame;

/// Base placement of an opening, derived from its wall alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningAnchor {
    /// Point on the wall's floor line at the opening's position.
    pub position: Point3,
    /// The wall's yaw.
    pub orientation: UnitQuaternion,
}

impl OpeningAnchor {
    /// Resolves the anchor, or `None` if the opening's wall no longer exists.
    #[must_use]
    pub fn resolve(opening: &Opening, frames: &[WallFrame]) -> Option<Self> {
        let frame = frames.get(opening.wall_index)?;
        Some(Self {
            position: plan_to_world(&frame.plan_point(opening.position_cm / 100.0), 0.0),
            orientation: frame.base_orientation(),
        })
    }
}
