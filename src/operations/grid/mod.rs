mod tile_grid;

pub use tile_grid::{AxisCell, AxisCells, GridCell, TileGrid, MAX_GRID_CELLS};
