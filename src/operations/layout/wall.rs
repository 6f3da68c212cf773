use std::collections::BTreeMap;

use crate::geometry::Bounds2;
use crate::math::PLAN_EPSILON;
use crate::model::{Opening, TileSize, WallConfig, WallTile};
use crate::operations::grid::TileGrid;
use crate::operations::walls::WallFrame;

use super::quantize;

/// Lays tiles on every wall in its local `(u, v)` frame.
///
/// Cells overlapping a door or window are left out. A world-space region
/// keeps only the cells whose midpoint falls inside it on the plan; a
/// wall-local region keeps only cells of one wall overlapping it.
pub struct WallTileLayout<'a> {
    frames: &'a [WallFrame],
    walls: &'a [WallConfig],
    tile_size: TileSize,
    openings: Vec<&'a Opening>,
    world_region: Option<Bounds2>,
    wall_region: Option<(usize, Bounds2)>,
    eps: f64,
}

impl<'a> WallTileLayout<'a> {
    /// Creates a new `WallTileLayout`. Walls without a config use the default one.
    #[must_use]
    pub fn new(frames: &'a [WallFrame], walls: &'a [WallConfig], tile_size: TileSize) -> Self {
        Self {
            frames,
            walls,
            tile_size,
            openings: Vec::new(),
            world_region: None,
            wall_region: None,
            eps: PLAN_EPSILON,
        }
    }

    #[must_use]
    pub fn with_openings(mut self, openings: impl IntoIterator<Item = &'a Opening>) -> Self {
        self.openings.extend(openings);
        self
    }

    /// Restricts tiling to cells whose plan midpoint lies in `bounds` (world `x`, `z`).
    #[must_use]
    pub fn with_world_region(mut self, bounds: Bounds2) -> Self {
        self.world_region = Some(bounds);
        self
    }

    /// Restricts tiling to one wall and the cells overlapping `bounds` in `(u, v)`.
    #[must_use]
    pub fn with_wall_region(mut self, wall_index: usize, bounds: Bounds2) -> Self {
        self.wall_region = Some((wall_index, bounds));
        self
    }

    #[must_use]
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Executes the layout, returning tiles wall by wall.
    #[must_use]
    pub fn execute(&self) -> Vec<WallTile> {
        let mut cutouts: Vec<Vec<Bounds2>> = vec![Vec::new(); self.frames.len()];
        for opening in &self.openings {
            match cutouts.get_mut(opening.wall_index) {
                Some(rects) => rects.push(opening.wall_rect()),
                None => tracing::debug!(
                    wall_index = opening.wall_index,
                    walls = self.frames.len(),
                    "skipping opening on missing wall"
                ),
            }
        }

        let mut tiles = Vec::new();
        for frame in self.frames {
            if let Some((index, _)) = self.wall_region {
                if index != frame.index {
                    continue;
                }
            }
            let height = self
                .walls
                .get(frame.index)
                .copied()
                .unwrap_or_default()
                .normalized()
                .height_m();
            let bounds = Bounds2::new(0.0, frame.length, 0.0, height);
            let grid = TileGrid::with_epsilon(&bounds, self.tile_size, self.eps);

            let before = tiles.len();
            for cell in grid.cells() {
                let rect = cell.bounds;
                if cutouts[frame.index].iter().any(|o| rect.overlaps(o, self.eps)) {
                    continue;
                }
                if let Some(region) = &self.world_region {
                    let mid = frame.plan_point(rect.center().x);
                    if !region.contains_point(&mid, self.eps) {
                        continue;
                    }
                }
                if let Some((_, region)) = &self.wall_region {
                    if !rect.overlaps(region, self.eps) {
                        continue;
                    }
                }
                tiles.push(WallTile {
                    segment_index: frame.index,
                    u: rect.min_x,
                    v: rect.min_y,
                    width: rect.width(),
                    height: rect.height(),
                });
            }
            tracing::trace!(wall = frame.index, tiles = tiles.len() - before, "laid wall tiles");
        }

        tiles
    }
}

/// Committed wall tiles, deduplicated by wall and cell corner.
#[derive(Debug, Clone)]
pub struct WallTileSet {
    tiles: BTreeMap<(usize, i64, i64), WallTile>,
    eps: f64,
}

impl Default for WallTileSet {
    fn default() -> Self {
        Self::new(PLAN_EPSILON)
    }
}

impl WallTileSet {
    #[must_use]
    pub fn new(eps: f64) -> Self {
        Self {
            tiles: BTreeMap::new(),
            eps,
        }
    }

    fn key(&self, tile: &WallTile) -> (usize, i64, i64) {
        (tile.segment_index, quantize(tile.u, self.eps), quantize(tile.v, self.eps))
    }

    /// Adds tiles, returning how many new cells were added.
    pub fn merge(&mut self, tiles: impl IntoIterator<Item = WallTile>) -> usize {
        let mut added = 0;
        for tile in tiles {
            let key = self.key(&tile);
            if let std::collections::btree_map::Entry::Vacant(slot) = self.tiles.entry(key) {
                slot.insert(tile);
                added += 1;
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

    pub fn iter(&self) -> impl Iterator<Item = &WallTile> {
        self.tiles.values()
    }

    #[must_use]
    pub fn contains(&self, tile: &WallTile) -> bool {
        self.tiles.contains_key(&self.key(tile))
    }
}
