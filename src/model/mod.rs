mod opening;
mod region;
mod segment;
mod snapshot;
mod tile;
mod tile_size;
mod wall;

pub use opening::{Opening, OpeningId, OpeningKind};
pub use region::Region;
pub use segment::Segment;
pub use snapshot::PlanSnapshot;
pub use tile::{FloorTile, WallTile};
pub use tile_size::TileSize;
pub use wall::WallConfig;
