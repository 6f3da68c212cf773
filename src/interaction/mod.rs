mod picking;
mod region_selector;

pub use picking::{SurfaceHit, SurfacePicker};
pub use region_selector::{DragMode, RegionSelector, SelectionEvent, SelectorState};
