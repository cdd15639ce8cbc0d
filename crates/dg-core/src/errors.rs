//! Error types for generation and configuration
//!
//! Geometry and topology failures abort the whole run; no partial grid
//! or tile state is ever published. Tiling ambiguity is not an error
//! (an unmatched cell simply gets no tile).

use thiserror::Error;

/// Fatal errors raised by the generation pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Two input vertices share the same grid position.
    #[error("duplicate vertex at ({x}, {y})")]
    DuplicateVertex { x: i32, y: i32 },

    /// A triangle was requested from fewer than three distinct points.
    #[error("degenerate triangle: repeated vertex at ({x}, {y})")]
    DegenerateTriangle { x: i32, y: i32 },

    /// The input points are collinear, so no circumcircle exists.
    #[error("collinear vertex set: circumcircle is undefined")]
    CollinearVertices,

    /// Not enough selected rooms to triangulate.
    #[error("need at least {need} selected rooms, got {got}")]
    TooFewRooms { got: usize, need: usize },

    /// A spanning-tree edge endpoint does not land on a room cell.
    #[error("spanning-tree endpoint ({x}, {y}) does not map to a room")]
    InconsistentTopology { x: i32, y: i32 },

    /// The placement collaborator produced no rooms at all.
    #[error("room list is empty")]
    NoRooms,
}

/// Errors raised while loading or validating a [`crate::GenConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(String),

    #[error("could not parse config file: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}
