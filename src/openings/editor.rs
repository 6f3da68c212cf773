use slotmap::{SecondaryMap, SlotMap};

use crate::error::{Result, SessionError};
use crate::math::Isometry3;
use crate::model::{Opening, OpeningId};
use crate::operations::walls::WallFrame;

use super::{OpeningAnchor, OpeningTransform};

/// Tracks the opening being edited and the pre-edit state of every opening
/// touched since the last replan.
///
/// Live edits stay in the editor until the opening is deselected or another
/// opening is selected; then they are written to the arena.
#[derive(Debug, Default)]
pub struct OpeningEditor {
    origins: SecondaryMap<OpeningId, OpeningTransform>,
    selected: Option<OpeningId>,
    live: Option<OpeningTransform>,
}

impl OpeningEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<OpeningId> {
        self.selected
    }

    /// The unsaved transform of `id`, if it is selected and has been moved.
    #[must_use]
    pub fn live(&self, id: OpeningId) -> Option<OpeningTransform> {
        if self.selected == Some(id) {
            self.live
        } else {
            None
        }
    }

    /// The transform recorded on first interaction with `id`.
    #[must_use]
    pub fn origin(&self, id: OpeningId) -> Option<&OpeningTransform> {
        self.origins.get(id)
    }

    /// Selects `id`, persisting any other selected opening first.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in `openings`.
    pub fn select(&mut self, id: OpeningId, openings: &mut SlotMap<OpeningId, Opening>) -> Result<()> {
        let current = OpeningTransform::of(openings.get(id).ok_or(SessionError::OpeningNotFound)?);
        if self.selected == Some(id) {
            return Ok(());
        }
        self.persist(openings);
        if !self.origins.contains_key(id) {
            self.origins.insert(id, current);
        }
        self.selected = Some(id);
        self.live = None;
        Ok(())
    }

    /// Records a new world placement for `id`, selecting it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is unknown or its wall no longer exists.
    pub fn update(
        &mut self,
        id: OpeningId,
        world: &Isometry3,
        openings: &mut SlotMap<OpeningId, Opening>,
        frames: &[WallFrame],
    ) -> Result<OpeningTransform> {
        let opening = openings.get(id).ok_or(SessionError::OpeningNotFound)?;
        let anchor = OpeningAnchor::resolve(opening, frames).ok_or(SessionError::WallOutOfRange {
            index: opening.wall_index,
            count: frames.len(),
        })?;
        self.select(id, openings)?;
        let transform = OpeningTransform::decompose(&anchor, world);
        self.live = Some(transform);
        Ok(transform)
    }

    /// Persists the selected opening and clears the selection.
    pub fn deselect(&mut self, openings: &mut SlotMap<OpeningId, Opening>) -> Option<OpeningId> {
        let id = self.selected;
        self.persist(openings);
        id
    }

    /// Restores `id` to its recorded origin and clears the selection.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is unknown or was never edited.
    pub fn revert(&mut self, id: OpeningId, openings: &mut SlotMap<OpeningId, Opening>) -> Result<OpeningTransform> {
        if !openings.contains_key(id) {
            return Err(SessionError::OpeningNotFound.into());
        }
        let origin = *self.origins.get(id).ok_or(SessionError::NoOrigin)?;
        if self.selected == Some(id) {
            self.live = None;
        }
        self.persist(openings);
        if let Some(opening) = openings.get_mut(id) {
            origin.apply_to(opening);
        }
        Ok(origin)
    }

    /// Drops the state kept for a removed opening.
    pub fn forget(&mut self, id: OpeningId) {
        self.origins.remove(id);
        if self.selected == Some(id) {
            self.selected = None;
            self.live = None;
        }
    }

    /// Drops all selection and origin state.
    pub fn clear(&mut self) {
        self.origins.clear();
        self.selected = None;
        self.live = None;
    }

    /// Writes the live transform of the selected opening and clears the selection.
    fn persist(&mut self, openings: &mut SlotMap<OpeningId, Opening>) {
        if let (Some(id), Some(live)) = (self.selected, self.live) {
            if let Some(opening) = openings.get_mut(id) {
                live.apply_to(opening);
            }
        }
        self.selected = None;
        self.live = None;
    }
}
