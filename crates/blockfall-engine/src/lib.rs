//! Falling-block puzzle simulation engine.
//!
//! The crate is split the same way the game is:
//!
//! - [`core`] - board cells, tetromino shapes and pieces
//! - [`engine`] - piece spawning, gravity, commands, scoring and the game-over lifecycle
//!
//! Nothing here draws or reads input. A driver feeds [`Engine::tick`] and
//! [`Engine::apply_command`] and renders from the read-only accessors.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({x}, {y}) is outside the {width}x{height} grid")]
pub struct CellOutOfRangeError {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape must have at least one row and one column")]
    Empty,
    #[display("shape rows must all have the same length")]
    Ragged,
    #[display("shape of {rows}x{cols} exceeds the {max}x{max} bounding box")]
    TooLarge { rows: usize, cols: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("fall interval must be positive")]
    ZeroFallInterval,
    #[display("cell size must be positive")]
    ZeroCellSize,
    #[display("grid of {width}x{height} cannot fit a spawned piece (needs at least {min_width}x{min_height})")]
    GridTooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
}
