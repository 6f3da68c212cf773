//! Door and window placement relative to their walls, with per-opening undo.

mod anchor;
mod editor;
mod transform;

pub use anchor::OpeningAnchor;
pub use editor::OpeningEditor;
pub use transform::OpeningTransform;
