use std::fmt;

use arrayvec::ArrayVec;
use serde::{Serialize, Serializer, ser::SerializeSeq as _};

use crate::ShapeError;

/// Largest number of rows or columns a shape may span.
pub const MAX_SHAPE_SIDE: usize = 4;

/// A rectangular matrix of filled flags describing a piece's footprint.
///
/// The matrix is stored inside a fixed 4×4 array; only the top-left
/// `rows × cols` region is meaningful and everything outside it is always
/// unfilled, so derived equality compares shapes by their visible cells.
///
/// # Example
///
/// ```
/// use blockfall_engine::Shape;
///
/// let shape = Shape::from_pattern(&["##.", ".##"]).unwrap();
/// let rotated = shape.rotated_clockwise();
/// assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
/// assert_eq!(rotated.to_string(), ".#\n##\n#.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Builds a shape from `#`/`.` text rows at compile time.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a constant) on an empty, ragged
    /// or oversized pattern.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub(crate) const fn from_pattern_const(pattern: &[&str]) -> Self {
        assert!(!pattern.is_empty() && pattern.len() <= MAX_SHAPE_SIDE);
        let cols = pattern[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_SIDE);
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let mut y = 0;
        while y < pattern.len() {
            let row = pattern[y].as_bytes();
            assert!(row.len() == cols);
            let mut x = 0;
            while x < cols {
                cells[y][x] = row[x] == b'#';
                x += 1;
            }
            y += 1;
        }
        Self {
            rows: pattern.len() as u8,
            cols: cols as u8,
            cells,
        }
    }

    /// Builds a shape from rows of filled flags.
    #[expect(clippy::cast_possible_truncation)]
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[bool]>,
    {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.is_empty() || cols == 0 {
            return Err(ShapeError::Empty);
        }
        if rows.iter().any(|row| row.as_ref().len() != cols) {
            return Err(ShapeError::Ragged);
        }
        if rows.len() > MAX_SHAPE_SIDE || cols > MAX_SHAPE_SIDE {
            return Err(ShapeError::TooLarge {
                rows: rows.len(),
                cols,
                max: MAX_SHAPE_SIDE,
            });
        }
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..cols].copy_from_slice(row.as_ref());
        }
        Ok(Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        })
    }

    /// Builds a shape from text rows where `#` marks a filled cell.
    pub fn from_pattern(pattern: &[&str]) -> Result<Self, ShapeError> {
        let rows: Vec<Vec<bool>> = pattern
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();
        Self::from_rows(&rows)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        usize::from(self.rows)
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        usize::from(self.cols)
    }

    /// Returns whether the cell at `(x, y)` within the shape is filled.
    ///
    /// Positions outside the shape are unfilled.
    #[must_use]
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.cols() && y < self.rows() && self.cells[y][x]
    }

    /// Returns an iterator over the `(x, y)` offsets of filled cells, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells[..self.rows()]
            .iter()
            .enumerate()
            .flat_map(move |(y, row)| {
                row[..self.cols()]
                    .iter()
                    .enumerate()
                    .filter_map(move |(x, &filled)| filled.then_some((x, y)))
            })
    }

    /// Returns this shape rotated 90° clockwise.
    ///
    /// A shape of `n` rows and `m` columns becomes one of `m` rows and `n`
    /// columns with `rotated[i][j] = shape[n - 1 - j][i]`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let n = self.rows();
        let m = self.cols();
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (i, row) in cells.iter_mut().enumerate().take(m) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Returns the distinct orientations reachable by clockwise rotation,
    /// starting with this one.
    #[must_use]
    pub fn orientations(&self) -> ArrayVec<Self, 4> {
        let mut orientations = ArrayVec::<Self, 4>::new();
        let mut shape = *self;
        for _ in 0..4 {
            if orientations.contains(&shape) {
                break;
            }
            orientations.push(shape);
            shape = shape.rotated_clockwise();
        }
        orientations
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.cols() {
                f.write_str(if self.cells[y][x] { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: one "#"/"." string per row (e.g., ["##.", ".##"])
        let mut seq = serializer.serialize_seq(Some(self.rows()))?;
        for row in &self.cells[..self.rows()] {
            let s: String = row[..self.cols()]
                .iter()
                .map(|&filled| if filled { '#' } else { '.' })
                .collect();
            seq.serialize_element(&s)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pattern() {
        let shape = Shape::from_pattern(&["###", ".#."]).unwrap();
        assert_eq!(shape.rows(), 2);
        assert_eq!(shape.cols(), 3);
        assert!(shape.is_filled(0, 0));
        assert!(!shape.is_filled(0, 1));
        assert!(shape.is_filled(1, 1));
        assert!(!shape.is_filled(3, 0));
        let cells: Vec<_> = shape.filled_cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (1, 1)]);
    }

    #[test]
    fn test_const_and_runtime_construction_agree() {
        const SHAPE: Shape = Shape::from_pattern_const(&[".##", "##."]);
        assert_eq!(SHAPE, Shape::from_pattern(&[".##", "##."]).unwrap());
    }

    #[test]
    fn test_invalid_shapes() {
        assert_eq!(Shape::from_pattern(&[]), Err(ShapeError::Empty));
        assert_eq!(Shape::from_pattern(&[""]), Err(ShapeError::Empty));
        assert_eq!(Shape::from_pattern(&["##", "#"]), Err(ShapeError::Ragged));
        assert_eq!(
            Shape::from_pattern(&["#####"]),
            Err(ShapeError::TooLarge {
                rows: 1,
                cols: 5,
                max: MAX_SHAPE_SIDE
            })
        );
    }

    #[test]
    fn test_rotation_index_mapping() {
        // rotated[i][j] = shape[n - 1 - j][i]
        let shape = Shape::from_pattern(&["###", "..#"]).unwrap();
        let rotated = shape.rotated_clockwise();
        assert_eq!(rotated.rows(), 3);
        assert_eq!(rotated.cols(), 2);
        for i in 0..rotated.rows() {
            for j in 0..rotated.cols() {
                assert_eq!(
                    rotated.is_filled(j, i),
                    shape.is_filled(i, shape.rows() - 1 - j),
                    "mismatch at rotated[{i}][{j}]"
                );
            }
        }
        assert_eq!(rotated.to_string(), ".#\n.#\n##");
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        let shape = Shape::from_pattern(&["##.", ".##"]).unwrap();
        let mut rotated = shape;
        for _ in 0..4 {
            rotated = rotated.rotated_clockwise();
        }
        assert_eq!(rotated, shape);
    }

    #[test]
    fn test_orientations() {
        let square = Shape::from_pattern(&["##", "##"]).unwrap();
        assert_eq!(square.orientations().len(), 1);
        let skew = Shape::from_pattern(&[".##", "##."]).unwrap();
        let orientations = skew.orientations();
        assert_eq!(orientations.len(), 2);
        assert_eq!(orientations[0], skew);
        assert_eq!(orientations[1].to_string(), "#.\n##\n.#");
        let tee = Shape::from_pattern(&[".#.", "###"]).unwrap();
        assert_eq!(tee.orientations().len(), 4);
    }

    #[test]
    fn test_square_is_rotation_invariant() {
        let shape = Shape::from_pattern(&["##", "##"]).unwrap();
        assert_eq!(shape.rotated_clockwise(), shape);
    }

    #[test]
    fn test_rotation_of_single_row() {
        let shape = Shape::from_pattern(&["####"]).unwrap();
        let rotated = shape.rotated_clockwise();
        assert_eq!((rotated.rows(), rotated.cols()), (4, 1));
        assert_eq!(rotated.filled_cells().count(), 4);
    }

    #[test]
    fn test_shape_serialization() {
        let shape = Shape::from_pattern(&[".#.", "###"]).unwrap();
        let serialized = serde_json::to_string(&shape).unwrap();
        assert_eq!(serialized, "[\".#.\",\"###\"]");
    }
}
