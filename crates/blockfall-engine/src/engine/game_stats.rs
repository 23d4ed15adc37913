use serde::Serialize;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// Scoring is flat: every cleared line is worth the same number of points
/// no matter how many lines clear together. There are no combo, multi-line
/// or soft-drop bonuses.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(2, 100);
///
/// assert_eq!(stats.score(), 200);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: u64,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines they cleared.
    ///
    /// Index 0 counts locks that cleared nothing; index 4 counts four-line
    /// clears. Larger clears are not counted here but still score.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece locks and `cleared_lines` rows are removed.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize, points_per_line: u64) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        let lines = u64::try_from(cleared_lines).unwrap_or(u64::MAX);
        self.score = self
            .score
            .saturating_add(lines.saturating_mul(points_per_line));
    }
}
