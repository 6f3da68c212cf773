mod floor;
mod wall;

pub use floor::{FloorTileLayout, FloorTileSet};
pub use wall::{WallTileLayout, WallTileSet};

use crate::math::Point2;

/// Integer key for a coordinate, so epsilon-equal values compare equal.
#[allow(clippy::cast_possible_truncation)]
fn quantize(value: f64, eps: f64) -> i64 {
    (value / eps).round() as i64
}

fn quantize_point(p: &Point2, eps: f64) -> (i64, i64) {
    (quantize(p.x, eps), quantize(p.y, eps))
}
