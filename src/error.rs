use thiserror::Error;

/// Top-level error type for the tile planning engine.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised by planner session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("opening not found")]
    OpeningNotFound,

    #[error("wall index {index} is out of range (room has {count} walls)")]
    WallOutOfRange { index: usize, count: usize },

    #[error("no origin recorded for opening")]
    NoOrigin,

    #[error("tile size {width} x {height} m must exceed the tolerance of {eps} m")]
    InvalidTileSize { width: f64, height: f64, eps: f64 },
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation input: {0}")]
    InvalidInput(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Errors related to loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Convenience type alias for results using [`PlannerError`].
pub type Result<T> = std::result::Result<T, PlannerError>;
