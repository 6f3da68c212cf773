pub mod bounds;
pub mod ray;
pub mod ring;
pub mod surface;

pub use bounds::Bounds2;
pub use ray::Ray;
pub use ring::Ring;
pub use surface::{Plane, Surface, SurfaceDomain};
