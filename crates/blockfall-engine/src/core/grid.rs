use crate::CellOutOfRangeError;

use super::color::Color;

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing locked here.
    #[default]
    Empty,
    /// Occupied by a locked piece of the given color.
    Filled(Color),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GridRow {
    cells: Box<[Cell]>,
}

impl GridRow {
    fn empty(width: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; width].into_boxed_slice(),
        }
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

/// The board of locked cells.
///
/// A grid has `height` rows of `width` cells and never changes size. Row 0 is
/// the top of the board; `y` grows downward. Cells change only when a piece
/// locks into the grid or when full rows are cleared.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Cell, Color, Grid};
///
/// let mut grid = Grid::new(10, 20);
/// for x in 0..10 {
///     grid.set_cell(x, 19, Color::Red).unwrap();
/// }
/// assert!(grid.is_row_full(19));
/// assert_eq!(grid.clear_full_rows(), 1);
/// assert_eq!(grid.cell_at(0, 19), Ok(Cell::Empty));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<GridRow>,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or does not fit in an `i32`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        assert!(i32::try_from(width).is_ok() && i32::try_from(height).is_ok());
        Self {
            width,
            rows: (0..height).map(|_| GridRow::empty(width)).collect(),
        }
    }

    /// Builds a grid from text rows, mainly for fixtures.
    ///
    /// `.` is an empty cell; any other character is filled with `color`.
    ///
    /// # Panics
    ///
    /// Panics if the rows are empty or have different lengths.
    #[must_use]
    pub fn from_rows(rows: &[&str], color: Color) -> Self {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width, "row {y} has a different width");
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    grid.rows[y].cells[x] = Cell::Filled(color);
                }
            }
        }
        grid
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Converts signed board coordinates into row/column indices.
    ///
    /// Returns `None` if the coordinate is outside `[0, width) x [0, height)`.
    #[must_use]
    pub fn index_of(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height())?;
        Some((x, y))
    }

    fn out_of_range(&self, x: i32, y: i32) -> CellOutOfRangeError {
        CellOutOfRangeError {
            x,
            y,
            width: self.width,
            height: self.height(),
        }
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell, CellOutOfRangeError> {
        let (cx, cy) = self.index_of(x, y).ok_or_else(|| self.out_of_range(x, y))?;
        Ok(self.rows[cy].cells[cx])
    }

    /// Writes `color` into a cell, overwriting whatever was there.
    pub fn set_cell(&mut self, x: i32, y: i32, color: Color) -> Result<(), CellOutOfRangeError> {
        let (cx, cy) = self.index_of(x, y).ok_or_else(|| self.out_of_range(x, y))?;
        self.rows[cy].cells[cx] = Cell::Filled(color);
        Ok(())
    }

    pub fn clear_cell(&mut self, x: i32, y: i32) -> Result<(), CellOutOfRangeError> {
        let (cx, cy) = self.index_of(x, y).ok_or_else(|| self.out_of_range(x, y))?;
        self.rows[cy].cells[cx] = Cell::Empty;
        Ok(())
    }

    /// Returns whether `x, y` is inside the grid and occupied.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cell_at(x, y).is_ok_and(|c| !c.is_empty())
    }

    /// Returns `true` if every cell of `row` is filled.
    ///
    /// Rows outside the grid are never full.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(GridRow::is_filled)
    }

    /// Returns an iterator over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|row| &*row.cells)
    }

    /// Returns the number of filled cells on the whole board.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.rows()
            .map(|row| row.iter().filter(|c| !c.is_empty()).count())
            .sum()
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Surviving rows slide down by the number of removed rows beneath them,
    /// keeping their relative order, and the same number of empty rows
    /// appear at the top.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..self.rows.len()).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows.swap(y, y + count);
            }
        }
        for row in &mut self.rows[..count] {
            row.clear();
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, y: i32) {
        for x in 0..grid.width() {
            grid.set_cell(i32::try_from(x).unwrap(), y, Color::Cyan).unwrap();
        }
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.filled_count(), 0);
        assert!(grid.rows().all(|row| row.len() == 10));
    }

    #[test]
    fn test_set_and_get_cell() {
        let mut grid = Grid::new(10, 20);
        assert_eq!(grid.cell_at(3, 4), Ok(Cell::Empty));
        grid.set_cell(3, 4, Color::Green).unwrap();
        assert_eq!(grid.cell_at(3, 4), Ok(Cell::Filled(Color::Green)));
        assert!(grid.is_occupied(3, 4));
        grid.clear_cell(3, 4).unwrap();
        assert!(!grid.is_occupied(3, 4));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Grid::new(10, 20);
        let err = grid.cell_at(10, 0).unwrap_err();
        assert_eq!(
            err,
            CellOutOfRangeError {
                x: 10,
                y: 0,
                width: 10,
                height: 20
            }
        );
        assert!(grid.cell_at(-1, 0).is_err());
        assert!(grid.cell_at(0, 20).is_err());
        assert!(grid.cell_at(0, -1).is_err());
        assert!(grid.set_cell(0, 20, Color::Red).is_err());
        assert_eq!(grid.filled_count(), 0);
        assert!(!grid.is_occupied(-1, -1));
    }

    #[test]
    fn test_is_row_full() {
        let mut grid = Grid::new(4, 3);
        assert!(!grid.is_row_full(2));
        for x in 0..3 {
            grid.set_cell(x, 2, Color::Blue).unwrap();
        }
        assert!(!grid.is_row_full(2));
        grid.set_cell(3, 2, Color::Blue).unwrap();
        assert!(grid.is_row_full(2));
        assert!(!grid.is_row_full(3));
    }

    #[test]
    fn test_clear_full_rows_none() {
        let mut grid = Grid::from_rows(&["....", "##.#", "#.##"], Color::Red);
        let before = grid.clone();
        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_bottom_row() {
        let mut grid = Grid::from_rows(&["....", "#...", "####"], Color::Red);
        assert_eq!(grid.clear_full_rows(), 1);
        assert_eq!(grid, Grid::from_rows(&["....", "....", "#..."], Color::Red));
    }

    #[test]
    fn test_clear_non_adjacent_rows_preserves_order() {
        let mut grid = Grid::from_rows(
            &["#...", "####", ".#..", "####", "..#."],
            Color::Yellow,
        );
        assert_eq!(grid.clear_full_rows(), 2);
        assert_eq!(
            grid,
            Grid::from_rows(&["....", "....", "#...", ".#..", "..#."], Color::Yellow)
        );
    }

    #[test]
    fn test_clear_all_rows() {
        let mut grid = Grid::new(10, 20);
        for y in 0..20 {
            fill_row(&mut grid, y);
        }
        assert_eq!(grid.clear_full_rows(), 20);
        assert_eq!(grid, Grid::new(10, 20));
    }

    #[test]
    fn test_clear_keeps_colors_of_surviving_cells() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell(0, 1, Color::Orange).unwrap();
        fill_row(&mut grid, 2);
        assert_eq!(grid.clear_full_rows(), 1);
        assert_eq!(grid.cell_at(0, 2), Ok(Cell::Filled(Color::Orange)));
        assert_eq!(grid.cell_at(0, 1), Ok(Cell::Empty));
    }
}
