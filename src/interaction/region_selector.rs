use crate::geometry::Bounds2;
use crate::math::Point2;
use crate::model::Region;

use super::SurfaceHit;

/// The surface a drag gesture is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Floor,
    Wall { wall_index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectorState {
    Idle,
    /// `start` is in the surface's 2D frame: `(x, z)` on the floor, `(u, v)` on a wall.
    Dragging { mode: DragMode, start: Point2 },
}

/// Output of a selector transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    Started(DragMode),
    /// Live region while the pointer moves; nothing is committed yet.
    Preview(Region),
    Committed(Region),
    Cancelled,
}

/// Turns pointer drags into floor or wall regions.
///
/// Hits are resolved by the caller. During a drag they must land on the
/// surface the drag started on; any other hit counts as no hit.
#[derive(Debug, Clone)]
pub struct RegionSelector {
    state: SelectorState,
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionSelector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SelectorState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> SelectorState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectorState::Dragging { .. })
    }

    /// The active drag's surface, if any.
    #[must_use]
    pub fn mode(&self) -> Option<DragMode> {
        match self.state {
            SelectorState::Idle => None,
            SelectorState::Dragging { mode, .. } => Some(mode),
        }
    }

    /// Starts a drag at `hit`. A press that hits nothing leaves the selector idle.
    ///
    /// Pressing again while dragging restarts the drag.
    pub fn pointer_down(&mut self, hit: Option<SurfaceHit>) -> Option<SelectionEvent> {
        let hit = hit?;
        let mode = hit.mode();
        self.state = SelectorState::Dragging {
            mode,
            start: hit.surface_point(),
        };
        Some(SelectionEvent::Started(mode))
    }

    /// Emits the live region, or cancels the drag when the pointer left its surface.
    pub fn pointer_move(&mut self, hit: Option<SurfaceHit>) -> Option<SelectionEvent> {
        let SelectorState::Dragging { mode, start } = self.state else {
            return None;
        };
        match Self::region_to(mode, start, hit) {
            Some(region) => Some(SelectionEvent::Preview(region)),
            None => {
                self.state = SelectorState::Idle;
                Some(SelectionEvent::Cancelled)
            }
        }
    }

    /// Ends the drag, committing the region when `hit` is on the drag's surface.
    pub fn pointer_up(&mut self, hit: Option<SurfaceHit>) -> Option<SelectionEvent> {
        let SelectorState::Dragging { mode, start } = self.state else {
            return None;
        };
        self.state = SelectorState::Idle;
        Some(match Self::region_to(mode, start, hit) {
            Some(region) => SelectionEvent::Committed(region),
            None => SelectionEvent::Cancelled,
        })
    }

    /// Abandons an active drag.
    pub fn cancel(&mut self) -> Option<SelectionEvent> {
        if !self.is_dragging() {
            return None;
        }
        self.state = SelectorState::Idle;
        Some(SelectionEvent::Cancelled)
    }

    fn region_to(mode: DragMode, start: Point2, hit: Option<SurfaceHit>) -> Option<Region> {
        let hit = hit.filter(|h| h.mode() == mode)?;
        let bounds = Bounds2::from_corners(start, hit.surface_point());
        Some(match mode {
            DragMode::Floor => Region::Floor { bounds },
            DragMode::Wall { wall_index } => Region::Wall { wall_index, bounds },
        })
    }
}
