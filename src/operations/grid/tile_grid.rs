use crate::geometry::Bounds2;
use crate::math::PLAN_EPSILON;
use crate::model::TileSize;

/// Largest number of cells a single grid may hold.
///
/// Every cell is clipped against the room, so a tile size far below the room
/// dimensions would stall a layout. Larger grids come out empty.
pub const MAX_GRID_CELLS: usize = 1 << 18;

/// One cell along a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCell {
    pub index: usize,
    pub start: f64,
    pub size: f64,
}

impl AxisCell {
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.size
    }

    #[must_use]
    pub fn center(&self) -> f64 {
        self.start + self.size * 0.5
    }
}

/// Partition of an interval into nominal-size cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisCells {
    cells: Vec<AxisCell>,
}

impl AxisCells {
    /// Steps from `min` by `nominal` until `max` is covered.
    ///
    /// The last cell shrinks to the remainder. A remainder of at most `eps`
    /// is absorbed rather than emitted as a sliver. Empty when the span is at
    /// most `eps`, `nominal` is not a positive finite number, or the span
    /// would need more than [`MAX_GRID_CELLS`] cells.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn partition(min: f64, max: f64, nominal: f64, eps: f64) -> Self {
        let span = max - min;
        if !(span.is_finite() && nominal.is_finite()) || span <= eps || nominal <= 0.0 {
            return Self::default();
        }
        if span / nominal > MAX_GRID_CELLS as f64 {
            return Self::default();
        }

        let mut cells = Vec::new();
        let mut index = 0usize;
        loop {
            // Multiply instead of accumulating so error does not grow with the count.
            let start = min + index as f64 * nominal;
            let remaining = max - start;
            if remaining <= eps {
                break;
            }
            let last = remaining <= nominal + eps;
            let size = if last { remaining } else { nominal };
            cells.push(AxisCell { index, start, size });
            if last {
                break;
            }
            index += 1;
        }
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[AxisCell] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub column: usize,
    pub row: usize,
    pub bounds: Bounds2,
}

/// Columns along the first axis crossed with rows along the second.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    columns: AxisCells,
    rows: AxisCells,
}

impl TileGrid {
    /// Covers `bounds` with cells of `tile_size`, using the default plan epsilon.
    #[must_use]
    pub fn new(bounds: &Bounds2, tile_size: TileSize) -> Self {
        Self::with_epsilon(bounds, tile_size, PLAN_EPSILON)
    }

    /// Covers `bounds` with cells of `tile_size`.
    ///
    /// The grid is empty for an invalid tile size or when it would hold more
    /// than [`MAX_GRID_CELLS`] cells.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn with_epsilon(bounds: &Bounds2, tile_size: TileSize, eps: f64) -> Self {
        let empty = Self {
            columns: AxisCells::default(),
            rows: AxisCells::default(),
        };
        if !tile_size.is_valid() {
            return empty;
        }

        let estimate = (bounds.width() / tile_size.width_m).ceil().max(1.0)
            * (bounds.height() / tile_size.height_m).ceil().max(1.0);
        if estimate.is_nan() || estimate > MAX_GRID_CELLS as f64 {
            tracing::warn!(
                estimate,
                max = MAX_GRID_CELLS,
                width = tile_size.width_m,
                height = tile_size.height_m,
                "tile grid too large, laying no tiles"
            );
            return empty;
        }

        Self {
            columns: AxisCells::partition(bounds.min_x, bounds.max_x, tile_size.width_m, eps),
            rows: AxisCells::partition(bounds.min_y, bounds.max_y, tile_size.height_m, eps),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &AxisCells {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &AxisCells {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len() * self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the cells column by column.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.columns.cells().iter().flat_map(move |col| {
            self.rows.cells().iter().map(move |row| GridCell {
                column: col.index,
                row: row.index,
                bounds: Bounds2::new(col.start, col.end(), row.start, row.end()),
            })
        })
    }
}
