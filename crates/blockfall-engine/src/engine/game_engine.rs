use serde::Serialize;

use crate::{ConfigError, Grid, Piece};

use super::{
    Command, CommandOutcome, EngineConfig, EngineSnapshot, GameStats, PieceSeed, PieceSource,
    Spawner, UniformSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Falling,
    GameOver,
}

/// What happened during one [`Engine::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Gravity steps taken (one per elapsed fall interval).
    pub gravity_steps: usize,
    /// Pieces that locked into the grid.
    pub pieces_locked: usize,
    /// Rows removed by line clears.
    pub lines_cleared: usize,
    /// The game ended during this tick.
    pub topped_out: bool,
}

/// The falling-block game: grid, falling piece, lookahead piece and score.
///
/// The engine is driven from outside by two entry points. [`Engine::tick`]
/// advances gravity by elapsed time, and [`Engine::apply_command`] applies a
/// player input. Everything else is read-only state for rendering.
///
/// Moves and rotations that do not fit are silently rejected. A piece locks
/// the moment gravity cannot move it down; there is no lock delay. The game
/// ends when a newly spawned piece does not fit, after which nothing changes.
#[derive(Debug, Clone)]
pub struct Engine<S = UniformSource> {
    config: EngineConfig,
    grid: Grid,
    current: Piece,
    next: Piece,
    spawner: Spawner<S>,
    state: EngineState,
    stats: GameStats,
    fall_accumulator_ms: u64,
}

impl Engine<UniformSource> {
    /// Creates a game with a randomly seeded piece sequence.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, UniformSource::random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible piece sequence.
    pub fn with_seed(config: EngineConfig, seed: PieceSeed) -> Result<Self, ConfigError> {
        Self::with_source(config, UniformSource::with_seed(seed))
    }
}

impl<S> Engine<S>
where
    S: PieceSource,
{
    /// Creates a game on an empty grid, drawing pieces from `source`.
    pub fn with_source(config: EngineConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        Ok(Self::start(config, grid, source))
    }

    /// Creates a game on a pre-filled grid whose size overrides the config's.
    ///
    /// If the first piece does not fit, the game starts over.
    pub fn with_grid(config: EngineConfig, grid: Grid, source: S) -> Result<Self, ConfigError> {
        let config = EngineConfig {
            width: grid.width(),
            height: grid.height(),
            ..config
        };
        config.validate()?;
        Ok(Self::start(config, grid, source))
    }

    fn start(config: EngineConfig, grid: Grid, source: S) -> Self {
        let mut spawner = Spawner::new(source, config.width);
        let current = spawner.spawn();
        let next = spawner.spawn();
        let state = if current.can_place(&grid, 0, 0, None) {
            EngineState::Falling
        } else {
            EngineState::GameOver
        };
        Self {
            config,
            grid,
            current,
            next,
            spawner,
            state,
            stats: GameStats::new(),
            fall_accumulator_ms: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn current(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next(&self) -> &Piece {
        &self.next
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Milliseconds accumulated toward the next gravity step.
    #[must_use]
    pub fn fall_accumulator_ms(&self) -> u64 {
        self.fall_accumulator_ms
    }

    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(&self.grid, self.current, self.next, self.state, &self.stats)
    }

    /// Advances gravity by `elapsed_ms`.
    ///
    /// One gravity step is taken for every full fall interval accumulated, so
    /// a long frame catches up instead of losing steps. Draining stops early
    /// if the game ends. Does nothing once the game is over.
    ///
    /// # Panics
    ///
    /// Panics if the falling piece lies outside the grid when it locks, which
    /// validated movement never allows.
    pub fn tick(&mut self, elapsed_ms: u64) -> TickReport {
        let mut report = TickReport::default();
        if self.state.is_game_over() {
            return report;
        }
        self.fall_accumulator_ms = self.fall_accumulator_ms.saturating_add(elapsed_ms);
        while self.fall_accumulator_ms >= self.config.fall_interval_ms {
            self.fall_accumulator_ms -= self.config.fall_interval_ms;
            report.gravity_steps += 1;
            self.gravity_step(&mut report);
            if self.state.is_game_over() {
                break;
            }
        }
        report
    }

    /// Applies one player command to the falling piece.
    pub fn apply_command(&mut self, command: Command) -> CommandOutcome {
        if self.state.is_game_over() {
            return CommandOutcome::Ignored;
        }
        let applied = match command {
            Command::MoveLeft => self.try_translate(-1, 0),
            Command::MoveRight => self.try_translate(1, 0),
            Command::SoftDrop => self.try_translate(0, 1),
            Command::Rotate => self.try_rotate(),
        };
        if applied {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Rejected
        }
    }

    fn try_translate(&mut self, dx: i32, dy: i32) -> bool {
        if !self.current.can_place(&self.grid, dx, dy, None) {
            return false;
        }
        self.current.translate(dx, dy);
        true
    }

    fn try_rotate(&mut self) -> bool {
        let rotated = self.current.rotated_shape();
        if !self.current.can_place(&self.grid, 0, 0, Some(&rotated)) {
            return false;
        }
        self.current.set_shape(rotated);
        true
    }

    fn gravity_step(&mut self, report: &mut TickReport) {
        if self.try_translate(0, 1) {
            return;
        }
        self.lock_current(report);
    }

    fn lock_current(&mut self, report: &mut TickReport) {
        self.current
            .lock(&mut self.grid)
            .expect("falling piece always lies inside the grid");
        let cleared_lines = self.grid.clear_full_rows();
        self.stats.complete_piece_drop(cleared_lines, self.config.points_per_line);
        report.pieces_locked += 1;
        report.lines_cleared += cleared_lines;

        self.current = self.next;
        self.next = self.spawner.spawn();
        if !self.current.can_place(&self.grid, 0, 0, None) {
            self.state = EngineState::GameOver;
            report.topped_out = true;
        }
    }
}
