use std::str::FromStr;

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

use crate::CellOutOfRangeError;

use super::{color::Color, grid::Grid, shape::Shape};

/// A falling tetromino: a shape, its color and the board position of the
/// top-left corner of its bounding box.
///
/// A piece is an overlay. It does not occupy grid cells until [`Piece::lock`]
/// copies it into the [`Grid`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let grid = Grid::new(10, 20);
/// let piece = Piece::spawn(PieceKind::T, grid.width());
/// assert_eq!((piece.x(), piece.y()), (4, 0));
/// assert!(piece.can_place(&grid, 0, 1, None));
/// assert!(!piece.can_place(&grid, -5, 0, None));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    color: Color,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece of `kind` in its spawn orientation at `(x, y)`.
    #[must_use]
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            color: kind.color(),
            x,
            y,
        }
    }

    /// Creates a piece horizontally centered on a grid `grid_width` cells
    /// wide, on the top row.
    ///
    /// # Panics
    ///
    /// Panics if `grid_width` does not fit in an `i32`.
    #[must_use]
    pub fn spawn(kind: PieceKind, grid_width: usize) -> Self {
        let width = i32::try_from(grid_width).expect("grid width fits in i32");
        let cols = i32::try_from(kind.shape().cols()).expect("shape width fits in i32");
        Self::new(kind, width / 2 - cols / 2, 0)
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the board coordinates of every filled cell.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        occupied_positions(&self.shape, self.x, self.y)
    }

    /// Returns the current shape rotated 90° clockwise.
    ///
    /// The piece itself is unchanged; callers commit the result with
    /// [`Piece::set_shape`] once it has been validated.
    #[must_use]
    pub fn rotated_shape(&self) -> Shape {
        self.shape.rotated_clockwise()
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Returns whether the piece, offset by `(dx, dy)` and optionally using
    /// `shape` instead of its own, fits on `grid`.
    ///
    /// Every filled cell must land inside the grid's columns and above its
    /// bottom edge. Cells above the top edge (negative `y`) are allowed and
    /// never collide; all other cells must be empty.
    #[must_use]
    pub fn can_place(&self, grid: &Grid, dx: i32, dy: i32, shape: Option<&Shape>) -> bool {
        let shape = shape.unwrap_or(&self.shape);
        let width = i32::try_from(grid.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(grid.height()).unwrap_or(i32::MAX);
        occupied_positions(shape, self.x + dx, self.y + dy).all(|(x, y)| {
            if x < 0 || x >= width || y >= height {
                return false;
            }
            y < 0 || !grid.is_occupied(x, y)
        })
    }

    /// Writes every filled cell of the piece into `grid` with the piece's color.
    ///
    /// No occupancy check is made: existing cells are overwritten. Callers
    /// should confirm `can_place(grid, 0, 0, None)` first. Cells are written
    /// in order, so an out-of-range cell leaves the earlier ones written.
    pub fn lock(&self, grid: &mut Grid) -> Result<(), CellOutOfRangeError> {
        for (x, y) in self.occupied_positions() {
            grid.set_cell(x, y, self.color)?;
        }
        Ok(())
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn occupied_positions(shape: &Shape, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
    shape
        .filled_cells()
        .map(move |(dx, dy)| (x + dx as i32, y + dy as i32))
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the spawn-orientation shape of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        PIECE_SHAPES[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character, in either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('t'), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Parses a sequence of kinds such as `"IOTSZJL"`.
    pub fn parse_sequence(s: &str) -> Result<Vec<Self>, ParsePieceKindError> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Self::from_char(c).ok_or(ParsePieceKindError::InvalidChar(c)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceKindError {
    #[display("empty piece kind (expected one of I, O, T, S, Z, J, L)")]
    Empty,
    #[display("invalid piece kind: {_0:?} (expected one of I, O, T, S, Z, J, L)")]
    InvalidChar(#[error(not(source))] char),
    #[display("piece kind {_0:?} must be a single character")]
    NotSingleChar(#[error(not(source))] String),
}

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or(ParsePieceKindError::InvalidChar(c)),
            (Some(_), Some(_)) => Err(ParsePieceKindError::NotSingleChar(s.to_owned())),
            (None, _) => Err(ParsePieceKindError::Empty),
        }
    }
}

const PIECE_SHAPES: [Shape; PieceKind::LEN] = [
    // I-piece
    Shape::from_pattern_const(&["###", ".#."]),
    // O-piece
    Shape::from_pattern_const(&["##", "##"]),
    // T-piece
    Shape::from_pattern_const(&[".#.", "###"]),
    // S-piece
    Shape::from_pattern_const(&["##.", ".##"]),
    // Z-piece
    Shape::from_pattern_const(&[".##", "##."]),
    // J-piece
    Shape::from_pattern_const(&["###", "..#"]),
    // L-piece
    Shape::from_pattern_const(&["###", "#.."]),
];
