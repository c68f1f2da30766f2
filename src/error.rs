use thiserror::Error;

/// Top-level error type for the polyroll crate.
#[derive(Debug, Error)]
pub enum PolyrollError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Roll(#[from] RollError),
}

/// Errors raised while constructing a shape definition.
///
/// These are fatal: a definition that fails to build is never handed out.
/// The type is `Clone` so the registry can cache a failure and report it on
/// every lookup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShapeError {
    #[error("unknown shape id: {0}")]
    UnknownShape(String),

    #[error("face discovery found {found} faces, expected {expected}")]
    FaceDiscovery { expected: usize, found: usize },

    #[error("no valid {colors}-coloring exists for {faces} faces")]
    ColoringFailed { faces: usize, colors: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to rolling kinematics.
#[derive(Debug, Error, PartialEq)]
pub enum RollError {
    #[error("face {0} not found")]
    FaceNotFound(usize),

    #[error("ground face has {found} vertices, expected {expected}")]
    GroundPolygon { expected: usize, found: usize },

    #[error("edge {edge} of face {face} has no neighbor")]
    OpenEdge { face: usize, edge: usize },

    #[error("crossing from face {from} to face {to} does not match a rollable edge")]
    NoMatchingEdge { from: usize, to: usize },

    #[error("resting face is {actual}, crossing expects {expected}")]
    RestingFaceMismatch { expected: usize, actual: usize },
}

/// Convenience type alias for results using [`PolyrollError`].
pub type Result<T> = std::result::Result<T, PolyrollError>;
