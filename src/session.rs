use slotmap::SlotMap;

use crate::config::PlannerConfig;
use crate::error::{Result, SessionError};
use crate::geometry::{Bounds2, Plane, Ray, Ring};
use crate::interaction::{DragMode, RegionSelector, SelectionEvent, SurfaceHit, SurfacePicker};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Isometry3, Point2, Point3, Vector3};
use crate::model::{Opening, OpeningId, PlanSnapshot, Region, Segment, TileSize, WallConfig};
use crate::openings::{OpeningAnchor, OpeningEditor, OpeningTransform};
use crate::operations::layout::{FloorTileLayout, FloorTileSet, WallTileLayout, WallTileSet};
use crate::operations::path::BuildPath;
use crate::operations::room::RoomOutline;
use crate::operations::walls::WallFrame;
use crate::tessellation::{TessellateShape, TriangleMesh};

/// A selector event together with its tile count.
///
/// For previews the count is the number of tiles the region would hold;
/// for commits it is the number of tiles newly added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionFeedback {
    pub event: SelectionEvent,
    pub tiles: usize,
}

/// One room being planned: its walls, openings and committed tiles.
///
/// Geometry derived from the segments is rebuilt by [`replan`](Self::replan),
/// which also drops everything that depends on the old walls.
#[derive(Debug)]
pub struct PlannerSession {
    config: PlannerConfig,
    segments: Vec<Segment>,
    walls: Vec<WallConfig>,
    openings: SlotMap<OpeningId, Opening>,
    tile_size: TileSize,

    points: Vec<Point2>,
    outline: RoomOutline,
    frames: Vec<WallFrame>,

    floor_tiles: FloorTileSet,
    wall_tiles: WallTileSet,
    regions: Vec<Region>,
    selector: RegionSelector,
    editor: OpeningEditor,
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl PlannerSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        let points = vec![Point2::origin()];
        Self {
            segments: Vec::new(),
            walls: Vec::new(),
            openings: SlotMap::with_key(),
            tile_size: config.default_tile_size,
            outline: RoomOutline::with_epsilon(&points, config.epsilon),
            frames: Vec::new(),
            points,
            floor_tiles: FloorTileSet::new(config.epsilon),
            wall_tiles: WallTileSet::new(config.epsilon),
            regions: Vec::new(),
            selector: RegionSelector::new(),
            editor: OpeningEditor::new(),
            config,
        }
    }

    /// Creates a session planned from `segments`.
    #[must_use]
    pub fn with_segments(config: PlannerConfig, segments: Vec<Segment>) -> Self {
        let mut session = Self::new(config);
        session.replan(segments);
        session
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn walls(&self) -> &[WallConfig] {
        &self.walls
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn outline(&self) -> &RoomOutline {
        &self.outline
    }

    #[must_use]
    pub fn frames(&self) -> &[WallFrame] {
        &self.frames
    }

    #[must_use]
    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    #[must_use]
    pub fn floor_tiles(&self) -> &FloorTileSet {
        &self.floor_tiles
    }

    #[must_use]
    pub fn wall_tiles(&self) -> &WallTileSet {
        &self.wall_tiles
    }

    /// Regions committed since the tiles were last cleared.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[must_use]
    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    /// Replaces the segment list and resets everything tied to the old walls.
    ///
    /// Wall configs go back to the default, and openings, tiles, regions, any
    /// drag in progress and the opening edit history are dropped.
    pub fn replan(&mut self, segments: Vec<Segment>) {
        let walls = vec![self.config.default_wall; segments.len()];
        self.rebuild(segments, walls);
        self.openings.clear();
        tracing::debug!(
            segments = self.segments.len(),
            area = self.outline.area(),
            "replanned room"
        );
    }

    /// Sets one wall's configuration, clamped into range.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a wall of the room.
    pub fn set_wall_config(&mut self, index: usize, config: WallConfig) -> Result<()> {
        let count = self.walls.len();
        let slot = self
            .walls
            .get_mut(index)
            .ok_or(SessionError::WallOutOfRange { index, count })?;
        *slot = config.normalized();
        Ok(())
    }

    /// Changes the tile size. Any change clears all committed tiles.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the session untouched, if either dimension
    /// is not larger than the configured epsilon.
    pub fn set_tile_size(&mut self, tile_size: TileSize) -> Result<()> {
        let eps = self.config.epsilon;
        if !tile_size.is_valid() || tile_size.width_m <= eps || tile_size.height_m <= eps {
            return Err(SessionError::InvalidTileSize {
                width: tile_size.width_m,
                height: tile_size.height_m,
                eps,
            }
            .into());
        }
        if tile_size == self.tile_size {
            return Ok(());
        }
        self.tile_size = tile_size;
        self.clear_tiles();
        tracing::debug!(width = tile_size.width_m, height = tile_size.height_m, "tile size changed");
        Ok(())
    }

    /// Drops all committed floor and wall tiles and the recorded regions.
    pub fn clear_tiles(&mut self) {
        self.floor_tiles.clear();
        self.wall_tiles.clear();
        self.regions.clear();
    }

    fn floor_layout(&self) -> FloorTileLayout<'_> {
        FloorTileLayout::new(&self.outline, self.tile_size).with_epsilon(self.config.epsilon)
    }

    fn wall_layout(&self) -> WallTileLayout<'_> {
        WallTileLayout::new(&self.frames, &self.walls, self.tile_size)
            .with_openings(self.openings.values())
            .with_epsilon(self.config.epsilon)
    }

    /// Tiles the whole floor. Returns the number of tiles added.
    pub fn fill_floor(&mut self) -> usize {
        let tiles = self.floor_layout().fill();
        let added = self.floor_tiles.merge(tiles);
        tracing::debug!(added, total = self.floor_tiles.len(), "filled floor");
        added
    }

    /// Tiles the part of the floor inside `bounds`. Returns the number of tiles added.
    pub fn commit_floor_region(&mut self, bounds: Bounds2) -> usize {
        let tiles = self.floor_layout().region(&bounds);
        let added = self.floor_tiles.merge(tiles);
        self.regions.push(Region::Floor { bounds });
        tracing::debug!(added, total = self.floor_tiles.len(), "committed floor region");
        added
    }

    /// Tiles every wall around its openings. Returns the number of tiles added.
    pub fn fill_walls(&mut self) -> usize {
        let tiles = self.wall_layout().execute();
        let added = self.wall_tiles.merge(tiles);
        tracing::debug!(added, total = self.wall_tiles.len(), "filled walls");
        added
    }

    /// Tiles the part of one wall overlapping `bounds` in `(u, v)`.
    pub fn commit_wall_region(&mut self, wall_index: usize, bounds: Bounds2) -> usize {
        let tiles = self.wall_layout().with_wall_region(wall_index, bounds).execute();
        let added = self.wall_tiles.merge(tiles);
        self.regions.push(Region::Wall { wall_index, bounds });
        tracing::debug!(wall_index, added, "committed wall region");
        added
    }

    /// Tiles the wall spans whose plan midpoint lies in `bounds` (world `x`, `z`).
    pub fn wall_tiles_in_world_region(&mut self, bounds: Bounds2) -> usize {
        let tiles = self.wall_layout().with_world_region(bounds).execute();
        let added = self.wall_tiles.merge(tiles);
        tracing::debug!(added, "tiled walls in world region");
        added
    }

    /// Number of tiles `region` would hold, without committing anything.
    #[must_use]
    pub fn count_in_region(&self, region: &Region) -> usize {
        match region {
            Region::Floor { bounds } => self.floor_layout().count_in_region(bounds),
            Region::Wall { wall_index, bounds } => {
                self.wall_layout().with_wall_region(*wall_index, *bounds).execute().len()
            }
        }
    }

    fn picker(&self) -> SurfacePicker {
        SurfacePicker::new(&self.outline, &self.frames, &self.walls).with_epsilon(self.config.epsilon)
    }

    /// Starts a region drag on whatever surface the ray hits first.
    pub fn pointer_down(&mut self, ray: &Ray) -> Option<SelectionFeedback> {
        let hit = self.picker().pick(ray);
        let event = self.selector.pointer_down(hit)?;
        Some(SelectionFeedback { event, tiles: 0 })
    }

    /// Updates the live region of the active drag.
    pub fn pointer_move(&mut self, ray: &Ray) -> Option<SelectionFeedback> {
        let hit = self.hit_for_drag(ray)?;
        let event = self.selector.pointer_move(hit)?;
        Some(self.feedback(event))
    }

    /// Finishes the active drag, committing its region if the ray still hits its surface.
    pub fn pointer_up(&mut self, ray: &Ray) -> Option<SelectionFeedback> {
        let hit = self.hit_for_drag(ray)?;
        let event = self.selector.pointer_up(hit)?;
        Some(self.feedback(event))
    }

    /// Abandons the active drag.
    pub fn pointer_cancel(&mut self) -> Option<SelectionFeedback> {
        let event = self.selector.cancel()?;
        tracing::debug!("region drag cancelled");
        Some(SelectionFeedback { event, tiles: 0 })
    }

    /// Hit on the active drag's surface; `None` when no drag is active.
    fn hit_for_drag(&self, ray: &Ray) -> Option<Option<SurfaceHit>> {
        let mode: DragMode = self.selector.mode()?;
        Some(self.picker().hit_for_mode(ray, mode))
    }

    fn feedback(&mut self, event: SelectionEvent) -> SelectionFeedback {
        let tiles = match event {
            SelectionEvent::Preview(region) => {
                let count = self.count_in_region(&region);
                tracing::trace!(count, "region preview");
                count
            }
            SelectionEvent::Committed(Region::Floor { bounds }) => self.commit_floor_region(bounds),
            SelectionEvent::Committed(Region::Wall { wall_index, bounds }) => {
                self.commit_wall_region(wall_index, bounds)
            }
            SelectionEvent::Cancelled => {
                tracing::debug!("region drag cancelled");
                0
            }
            SelectionEvent::Started(_) => 0,
        };
        SelectionFeedback { event, tiles }
    }

    /// Adds an opening. Its wall index is not checked.
    pub fn add_opening(&mut self, opening: Opening) -> OpeningId {
        self.openings.insert(opening)
    }

    pub fn remove_opening(&mut self, id: OpeningId) -> Option<Opening> {
        self.editor.forget(id);
        self.openings.remove(id)
    }

    #[must_use]
    pub fn opening(&self, id: OpeningId) -> Option<&Opening> {
        self.openings.get(id)
    }

    pub fn openings(&self) -> impl Iterator<Item = (OpeningId, &Opening)> {
        self.openings.iter()
    }

    /// Removes openings whose wall no longer exists. Returns how many were removed.
    pub fn prune_orphaned_openings(&mut self) -> usize {
        let count = self.frames.len();
        let orphaned: Vec<OpeningId> = self
            .openings
            .iter()
            .filter(|(_, o)| o.wall_index >= count)
            .map(|(id, _)| id)
            .collect();
        for &id in &orphaned {
            self.remove_opening(id);
        }
        if !orphaned.is_empty() {
            tracing::debug!(removed = orphaned.len(), "pruned orphaned openings");
        }
        orphaned.len()
    }

    /// # Errors
    ///
    /// Returns an error if `id` is unknown.
    pub fn select_opening(&mut self, id: OpeningId) -> Result<()> {
        self.editor.select(id, &mut self.openings)
    }

    /// Records a new world placement for an opening being dragged.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is unknown or its wall no longer exists.
    pub fn update_opening(&mut self, id: OpeningId, world: &Isometry3) -> Result<OpeningTransform> {
        self.editor.update(id, world, &mut self.openings, &self.frames)
    }

    /// Persists the selected opening's placement and clears the selection.
    pub fn deselect_opening(&mut self) -> Option<OpeningId> {
        self.editor.deselect(&mut self.openings)
    }

    /// Restores an opening to its placement before it was first edited.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is unknown or was never edited.
    pub fn revert_opening(&mut self, id: OpeningId) -> Result<OpeningTransform> {
        let origin = self.editor.revert(id, &mut self.openings)?;
        tracing::debug!("opening reverted");
        Ok(origin)
    }

    /// The placement from which `id` was first edited.
    #[must_use]
    pub fn opening_origin(&self, id: OpeningId) -> Option<&OpeningTransform> {
        self.editor.origin(id)
    }

    /// Current world placement of an opening, including unsaved edits.
    ///
    /// `None` if the opening is unknown or its wall no longer exists.
    #[must_use]
    pub fn opening_world_transform(&self, id: OpeningId) -> Option<Isometry3> {
        let opening = self.openings.get(id)?;
        let anchor = OpeningAnchor::resolve(opening, &self.frames)?;
        let transform = self.editor.live(id).unwrap_or_else(|| OpeningTransform::of(opening));
        Some(transform.compose(&anchor))
    }

    /// The persisted state, including unsaved opening edits.
    #[must_use]
    pub fn snapshot(&self) -> PlanSnapshot {
        let openings = self
            .openings
            .iter()
            .map(|(id, opening)| {
                let mut opening = opening.clone();
                if let Some(live) = self.editor.live(id) {
                    live.apply_to(&mut opening);
                }
                opening
            })
            .collect();
        PlanSnapshot {
            segments: self.segments.clone(),
            walls: self.walls.clone(),
            openings,
            tile_size: self.tile_size,
        }
    }

    /// Loads a persisted state, replacing everything in the session.
    ///
    /// Wall configs are clamped, missing ones take the default and surplus
    /// ones are dropped. Openings are kept even when their wall is missing.
    pub fn restore(&mut self, snapshot: PlanSnapshot) {
        let PlanSnapshot {
            segments,
            walls,
            openings,
            tile_size,
        } = snapshot;
        let mut walls: Vec<WallConfig> = walls.into_iter().map(WallConfig::normalized).collect();
        walls.resize(segments.len(), self.config.default_wall);

        self.rebuild(segments, walls);
        self.tile_size = if tile_size.is_valid() {
            tile_size
        } else {
            tracing::warn!(
                width = tile_size.width_m,
                height = tile_size.height_m,
                "snapshot tile size is unusable, using the default"
            );
            self.config.default_tile_size
        };
        self.openings.clear();
        for opening in openings {
            self.openings.insert(opening);
        }
        tracing::debug!(
            segments = self.segments.len(),
            openings = self.openings.len(),
            "restored snapshot"
        );
    }

    fn rebuild(&mut self, segments: Vec<Segment>, walls: Vec<WallConfig>) {
        self.points = BuildPath::new(&segments).execute();
        self.outline = RoomOutline::with_epsilon(&self.points, self.config.epsilon);
        self.frames = WallFrame::from_path(&self.points);
        self.segments = segments;
        self.walls = walls;
        self.clear_tiles();
        self.selector = RegionSelector::new();
        self.editor.clear();
    }

    /// Mesh of every committed floor tile, extruded by the configured thickness.
    ///
    /// # Errors
    ///
    /// Returns an error if a tile shape cannot be triangulated.
    pub fn floor_tile_mesh(&self) -> Result<TriangleMesh> {
        let plane = Plane::floor();
        let mut mesh = TriangleMesh::default();
        for tile in self.floor_tiles.iter() {
            let part = TessellateShape::new(&tile.shape, &plane)
                .flipped()
                .with_thickness(self.config.tile_thickness)
                .execute()?;
            mesh.merge(&part);
        }
        Ok(mesh)
    }

    /// Mesh of every committed wall tile, facing into the room.
    ///
    /// # Errors
    ///
    /// Returns an error if a tile cannot be triangulated.
    pub fn wall_tile_mesh(&self) -> Result<TriangleMesh> {
        // Wall planes face left of their direction, which is inside for a
        // counter-clockwise path.
        let outward = signed_area_2d(&self.points) < 0.0;
        let mut mesh = TriangleMesh::default();
        for tile in self.wall_tiles.iter() {
            let Some(frame) = self.frames.get(tile.segment_index) else {
                continue;
            };
            let height = self.walls.get(tile.segment_index).map_or(0.0, WallConfig::height_m);
            let Some(plane) = frame.plane(height) else {
                continue;
            };
            let rings = [Ring::from_bounds(&tile.rect())];
            let mut op = TessellateShape::new(&rings, &plane).with_thickness(self.config.tile_thickness);
            if outward {
                op = op.flipped();
            }
            mesh.merge(&op.execute()?);
        }
        Ok(mesh)
    }

    /// The room's floor, facing up.
    ///
    /// Floor and ceiling share the room centre as their UV origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the outline cannot be triangulated.
    pub fn floor_mesh(&self) -> Result<TriangleMesh> {
        let rings = [self.outline.centered()];
        TessellateShape::new(&rings, &self.centered_plane(0.0)?).flipped().execute()
    }

    /// The room's ceiling at the tallest wall height, facing down.
    ///
    /// # Errors
    ///
    /// Returns an error if the outline cannot be triangulated.
    pub fn ceiling_mesh(&self) -> Result<TriangleMesh> {
        let height = self.walls.iter().map(WallConfig::height_m).fold(0.0, f64::max);
        let rings = [self.outline.centered()];
        TessellateShape::new(&rings, &self.centered_plane(height)?).execute()
    }

    /// Horizontal plane at `height` whose origin sits over the room centre.
    fn centered_plane(&self, height: f64) -> Result<Plane> {
        let center = self.outline.center();
        Plane::new(Point3::new(center.x, height, center.y), Vector3::x(), Vector3::z())
    }
}
