pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod math;
pub mod model;
pub mod openings;
pub mod operations;
pub mod session;
pub mod tessellation;

pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use session::{PlannerSession, SelectionFeedback};
