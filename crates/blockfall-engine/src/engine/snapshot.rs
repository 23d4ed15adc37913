use serde::Serialize;

use crate::{Color, Grid, Piece};

use super::{EngineState, GameStats};

/// A self-contained copy of everything a renderer needs for one frame.
///
/// Empty cells serialize as `null` and filled cells as their color name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    pub width: usize,
    pub height: usize,
    /// Locked cells, top row first.
    pub cells: Vec<Vec<Option<Color>>>,
    pub current: Piece,
    pub next: Piece,
    pub score: u64,
    pub state: EngineState,
    pub game_over: bool,
    pub stats: GameStats,
}

impl EngineSnapshot {
    pub(crate) fn capture(
        grid: &Grid,
        current: Piece,
        next: Piece,
        state: EngineState,
        stats: &GameStats,
    ) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid
                .rows()
                .map(|row| row.iter().map(|cell| cell.color()).collect())
                .collect(),
            current,
            next,
            score: stats.score(),
            state,
            game_over: state.is_game_over(),
            stats: stats.clone(),
        }
    }

    /// Returns the color visible at `(x, y)`, with the falling piece drawn
    /// over the locked cells.
    #[must_use]
    pub fn visible_color(&self, x: usize, y: usize) -> Option<Color> {
        let on_piece = self.current.occupied_positions().any(|(px, py)| {
            usize::try_from(px).is_ok_and(|px| px == x) && usize::try_from(py).is_ok_and(|py| py == y)
        });
        if on_piece && !self.game_over {
            return Some(self.current.color());
        }
        self.cells.get(y).and_then(|row| row.get(x)).copied().flatten()
    }
}
