use crate::geometry::{Bounds2, Ring};
use crate::math::{Point2, Point3};
use crate::operations::walls::WallFrame;

/// A floor tile: one grid cell clipped against the room (and selection).
#[derive(Debug, Clone, PartialEq)]
pub struct FloorTile {
    pub column: usize,
    pub row: usize,
    pub center_x: f64,
    pub center_z: f64,
    /// Cell width before clipping, metres.
    pub width: f64,
    /// Cell depth (along `z`) before clipping, metres.
    pub height: f64,
    /// Clipped outline; counter-clockwise rings are filled, clockwise rings are holes.
    pub shape: Vec<Ring>,
}

impl FloorTile {
    /// The unclipped cell rectangle.
    #[must_use]
    pub fn cell(&self) -> Bounds2 {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        Bounds2::new(self.center_x - hw, self.center_x + hw, self.center_z - hh, self.center_z + hh)
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(self.center_x, self.center_z)
    }

    /// Net covered area of the clipped shape.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.shape.iter().map(Ring::signed_area).sum()
    }

    /// Returns `true` if clipping removed part of the cell.
    #[must_use]
    pub fn is_partial(&self, eps: f64) -> bool {
        (self.cell().area() - self.area()).abs() > eps
    }
}

/// A wall tile in its wall's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallTile {
    pub segment_index: usize,
    /// Distance along the wall of the tile's near edge, metres.
    pub u: f64,
    /// Height of the tile's bottom edge, metres.
    pub v: f64,
    pub width: f64,
    pub height: f64,
}

impl WallTile {
    /// The tile rectangle in `(u, v)`.
    #[must_use]
    pub fn rect(&self) -> Bounds2 {
        Bounds2::new(self.u, self.u + self.width, self.v, self.v + self.height)
    }

    /// World position of the tile's lower near corner on `frame`.
    #[must_use]
    pub fn world_origin(&self, frame: &WallFrame) -> Point3 {
        frame.world_point(self.u, self.v)
    }

    #[must_use]
    pub fn world_center(&self, frame: &WallFrame) -> Point3 {
        frame.world_point(self.u + self.width * 0.5, self.v + self.height * 0.5)
    }
}
