pub mod clip;
pub mod grid;
pub mod layout;
pub mod path;
pub mod room;
pub mod walls;
