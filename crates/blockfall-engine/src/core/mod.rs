//! Board and piece primitives.
//!
//! - [`Grid`] - the fixed-size board of locked cells
//! - [`Shape`] - a tetromino's boolean matrix and its clockwise rotation
//! - [`Piece`] - a shape with a color and a board position, not yet part of the grid
//! - [`PieceKind`] / [`Color`] - the seven canonical tetrominoes and their colors

pub use self::{color::*, grid::*, piece::*, shape::*};

pub(crate) mod color;
pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod shape;
