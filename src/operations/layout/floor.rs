use std::collections::BTreeMap;

use crate::geometry::{Bounds2, Ring};
use crate::math::{Point2, PLAN_EPSILON};
use crate::model::{FloorTile, TileSize};
use crate::operations::clip::{IntersectPolygons, UnitePolygons};
use crate::operations::grid::TileGrid;
use crate::operations::room::RoomOutline;

use super::quantize_point;

/// Lays floor tiles over a room, clipped to its outline.
///
/// The grid always spans the room bounds, so tiles from separate region
/// commits line up with each other and with a full fill.
pub struct FloorTileLayout<'a> {
    outline: &'a RoomOutline,
    tile_size: TileSize,
    eps: f64,
}

impl<'a> FloorTileLayout<'a> {
    /// Creates a new `FloorTileLayout` with the default plan epsilon.
    #[must_use]
    pub fn new(outline: &'a RoomOutline, tile_size: TileSize) -> Self {
        Self {
            outline,
            tile_size,
            eps: PLAN_EPSILON,
        }
    }

    #[must_use]
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Every cell that overlaps the room, clipped to the outline.
    #[must_use]
    pub fn fill(&self) -> Vec<FloorTile> {
        self.layout(None)
    }

    /// Cells overlapping both the room and `selection`, clipped to both.
    #[must_use]
    pub fn region(&self, selection: &Bounds2) -> Vec<FloorTile> {
        self.layout(Some(selection))
    }

    /// Number of tiles [`region`](Self::region) would produce.
    #[must_use]
    pub fn count_in_region(&self, selection: &Bounds2) -> usize {
        self.region(selection).len()
    }

    fn layout(&self, selection: Option<&Bounds2>) -> Vec<FloorTile> {
        if self.outline.is_degenerate() {
            return Vec::new();
        }
        let selection_ring = selection.map(Ring::from_bounds);
        let grid = TileGrid::with_epsilon(&self.outline.bounds(), self.tile_size, self.eps);

        let mut tiles = Vec::new();
        for cell in grid.cells() {
            if selection.is_some_and(|s| !cell.bounds.overlaps(s, self.eps)) {
                continue;
            }

            let mut rings = vec![Ring::from_bounds(&cell.bounds), self.outline.ring().clone()];
            rings.extend(selection_ring.iter().cloned());
            let shape = IntersectPolygons::new(&rings).with_epsilon(self.eps).execute();
            if shape.is_empty() {
                continue;
            }

            let center = cell.bounds.center();
            tiles.push(FloorTile {
                column: cell.column,
                row: cell.row,
                center_x: center.x,
                center_z: center.y,
                width: cell.bounds.width(),
                height: cell.bounds.height(),
                shape,
            });
        }

        tracing::trace!(tiles = tiles.len(), region = selection.is_some(), "laid floor tiles");
        tiles
    }
}

/// Committed floor tiles, deduplicated by cell centre.
#[derive(Debug, Clone)]
pub struct FloorTileSet {
    tiles: BTreeMap<(i64, i64), FloorTile>,
    eps: f64,
}

impl Default for FloorTileSet {
    fn default() -> Self {
        Self::new(PLAN_EPSILON)
    }
}

impl FloorTileSet {
    #[must_use]
    pub fn new(eps: f64) -> Self {
        Self {
            tiles: BTreeMap::new(),
            eps,
        }
    }

    /// Adds tiles, returning how many new cells were added.
    ///
    /// A tile whose centre is already present is united with the stored
    /// one, so regions that split a cell between them cover it together and
    /// re-marking a region changes nothing.
    pub fn merge(&mut self, tiles: impl IntoIterator<Item = FloorTile>) -> usize {
        let mut added = 0;
        for tile in tiles {
            let key = quantize_point(&tile.center(), self.eps);
            match self.tiles.get_mut(&key) {
                None => {
                    self.tiles.insert(key, tile);
                    added += 1;
                }
                Some(existing) => unite_tile(existing, &tile, self.eps),
            }
        }
        added
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloorTile> {
        self.tiles.values()
    }

    /// Centres of the stored tiles, ordered by quantized key.
    #[must_use]
    pub fn centers(&self) -> Vec<Point2> {
        self.tiles.values().map(FloorTile::center).collect()
    }

    /// Returns `true` if a tile with an epsilon-equal centre is stored.
    #[must_use]
    pub fn contains_center(&self, center: &Point2) -> bool {
        self.tiles.contains_key(&quantize_point(center, self.eps))
    }
}

/// Grows `existing` to also cover `tile`, which shares its cell.
fn unite_tile(existing: &mut FloorTile, tile: &FloorTile, eps: f64) {
    let slack = eps * eps;
    if existing.area() >= existing.cell().area() - slack {
        return;
    }
    match UnitePolygons::new(&existing.shape, &tile.shape).with_epsilon(eps).execute() {
        Ok(shape) => {
            let area: f64 = shape.iter().map(Ring::signed_area).sum();
            if area > existing.area() + slack {
                existing.shape = shape;
            }
        }
        Err(err) => {
            tracing::warn!(%err, column = tile.column, row = tile.row, "could not unite tile shapes");
            if tile.area() > existing.area() + slack {
                existing.shape.clone_from(&tile.shape);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::model::Segment;
    use crate::operations::path::BuildPath;

    fn unit_square_room() -> RoomOutline {
        let segs = [
            Segment::new(100.0, 0.0),
            Segment::new(100.0, 90.0),
            Segment::new(100.0, 180.0),
            Segment::new(100.0, 270.0),
        ];
        RoomOutline::from_points(&BuildPath::new(&segs).execute())
    }

    fn l_room() -> RoomOutline {
        // 2 m x 2 m with the top-right 1 m x 1 m quarter missing.
        let segs = [
            Segment::new(200.0, 0.0),
            Segment::new(100.0, 90.0),
            Segment::new(100.0, 180.0),
            Segment::new(100.0, 90.0),
            Segment::new(100.0, 180.0),
            Segment::new(200.0, 270.0),
        ];
        RoomOutline::from_points(&BuildPath::new(&segs).execute())
    }

    fn total_area(tiles: &[FloorTile]) -> f64 {
        tiles.iter().map(FloorTile::area).sum()
    }

    #[test]
    fn square_room_fill() {
        let room = unit_square_room();
        let tiles = FloorTileLayout::new(&room, TileSize::default()).fill();
        // 3 full columns plus a 0.1 m remainder on each axis.
        assert_eq!(tiles.len(), 16);
        let full = tiles.iter().filter(|t| !t.is_partial(1e-9)).count();
        let narrow = tiles.iter().filter(|t| t.width < 0.3 - 1e-9 || t.height < 0.3 - 1e-9).count();
        assert_eq!(narrow, 7);
        assert_eq!(full, 16);
        assert_abs_diff_eq!(total_area(&tiles), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn concave_room_tiles_sum_to_room_area() {
        let room = l_room();
        assert_abs_diff_eq!(room.area(), 3.0, epsilon = 1e-9);
        let tiles = FloorTileLayout::new(&room, TileSize::new(0.4, 0.4)).fill();
        assert_abs_diff_eq!(total_area(&tiles), 3.0, epsilon = 1e-9);
        // The cell straddling the inner corner at (1, 1) is cut to an L.
        let corner = tiles
            .iter()
            .find(|t| t.cell().contains_point(&Point2::new(1.0, 1.0), 0.0))
            .unwrap();
        assert!(corner.is_partial(1e-9));
        assert_eq!(corner.shape.len(), 1);
        assert_eq!(corner.shape[0].len(), 6);
        // Cells wholly inside the notch are skipped.
        assert!(tiles.iter().all(|t| !(t.center_x > 1.2 && t.center_z > 1.2)));
    }

    #[test]
    fn region_is_clipped_to_selection() {
        let room = unit_square_room();
        let layout = FloorTileLayout::new(&room, TileSize::default());
        let tiles = layout.region(&Bounds2::new(0.1, 0.5, 0.1, 0.5));
        assert_eq!(tiles.len(), 4);
        assert_abs_diff_eq!(total_area(&tiles), 0.16, epsilon = 1e-9);
        assert_eq!(layout.count_in_region(&Bounds2::new(0.1, 0.5, 0.1, 0.5)), 4);
    }

    #[test]
    fn zero_area_region_has_no_tiles() {
        let room = unit_square_room();
        let layout = FloorTileLayout::new(&room, TileSize::default());
        assert!(layout.region(&Bounds2::new(0.4, 0.4, 0.1, 0.8)).is_empty());
    }

    #[test]
    fn region_outside_room_has_no_tiles() {
        let room = l_room();
        let layout = FloorTileLayout::new(&room, TileSize::new(0.4, 0.4));
        assert!(layout.region(&Bounds2::new(1.3, 1.9, 1.3, 1.9)).is_empty());
    }

    #[test]
    fn overlapping_commits_do_not_duplicate() {
        let room = unit_square_room();
        let layout = FloorTileLayout::new(&room, TileSize::default());
        let mut set = FloorTileSet::default();
        let first = set.merge(layout.region(&Bounds2::new(0.0, 0.6, 0.0, 0.6)));
        let second = set.merge(layout.region(&Bounds2::new(0.3, 0.9, 0.3, 0.9)));
        assert_eq!(first, 4);
        assert_eq!(second, 3);
        assert_eq!(set.len(), 7);
        assert_eq!(set.merge(layout.region(&Bounds2::new(0.3, 0.9, 0.3, 0.9))), 0);
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn fill_equals_union_of_regions() {
        let room = l_room();
        let layout = FloorTileLayout::new(&room, TileSize::new(0.35, 0.25));
        let mut filled = FloorTileSet::default();
        filled.merge(layout.fill());

        let mut marked = FloorTileSet::default();
        for selection in [
            Bounds2::new(-0.5, 1.1, -0.5, 1.1),
            Bounds2::new(0.9, 2.5, -0.5, 0.8),
            Bounds2::new(-0.5, 0.7, 0.9, 2.5),
            Bounds2::new(0.5, 2.5, 0.5, 2.5),
        ] {
            marked.merge(layout.region(&selection));
        }

        assert_eq!(filled.len(), marked.len());
        for c in filled.centers() {
            assert!(marked.contains_center(&c));
        }
        let marked_area: f64 = marked.iter().map(FloorTile::area).sum();
        assert_abs_diff_eq!(marked_area, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn adjoining_regions_split_cells_without_losing_area() {
        let room = unit_square_room();
        let layout = FloorTileLayout::new(&room, TileSize::default());
        let mut set = FloorTileSet::default();
        assert_eq!(set.merge(layout.region(&Bounds2::new(0.0, 0.45, 0.0, 1.0))), 8);
        assert_eq!(set.merge(layout.region(&Bounds2::new(0.45, 1.0, 0.0, 1.0))), 8);
        assert_eq!(set.len(), 16);

        let area: f64 = set.iter().map(FloorTile::area).sum();
        assert_abs_diff_eq!(area, 1.0, epsilon = 1e-9);
        for tile in set.iter() {
            assert!(!tile.is_partial(1e-9), "cell ({}, {}) left partial", tile.column, tile.row);
            assert_eq!(tile.shape.len(), 1);
        }
    }

    #[test]
    fn clear_empties_set() {
        let room = unit_square_room();
        let mut set = FloorTileSet::default();
        set.merge(FloorTileLayout::new(&room, TileSize::default()).fill());
        assert!(!set.is_empty());
        set.clear();
        assert!(set.is_empty());
    }
}
