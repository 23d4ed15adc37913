//! Game engine logic and state management.
//!
//! This module orchestrates the [`core`](crate::core) primitives into a playable game:
//!
//! - [`Engine`] - owns the grid, the falling piece and the next piece; runs gravity and commands
//! - [`Spawner`] / [`PieceSource`] - produce new pieces from an injected random source
//! - [`EngineConfig`] - grid size, fall interval and line-clear reward
//! - [`GameStats`] - score and line-clear counters
//! - [`EngineSnapshot`] - a serializable read-only view for renderers
//!
//! # Game Flow
//!
//! 1. Create an [`Engine`] from a config and a piece source
//! 2. Each frame, call [`Engine::tick`] with the elapsed milliseconds
//! 3. Then feed that frame's player input through [`Engine::apply_command`]
//! 4. Read the state back for rendering
//! 5. Stop once [`Engine::is_game_over`] returns `true`
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Command, Engine, EngineConfig, PieceSeed};
//!
//! let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let mut engine = Engine::with_seed(EngineConfig::default(), seed).unwrap();
//!
//! engine.tick(16);
//! engine.apply_command(Command::MoveLeft);
//! engine.apply_command(Command::Rotate);
//!
//! while !engine.is_game_over() {
//!     engine.tick(500);
//! }
//! println!("final score: {}", engine.score());
//! ```

pub use self::{command::*, config::*, game_engine::*, game_stats::*, snapshot::*, spawner::*};

mod command;
mod config;
mod game_engine;
mod game_stats;
mod snapshot;
mod spawner;
