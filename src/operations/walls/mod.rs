mod wall_frame;

pub use wall_frame::WallFrame;
