//! Property tests for grid, shape and engine invariants.
//!
//! Invariants covered:
//! - Grid dimensions never change under any mix of ticks and commands.
//! - Clearing `k` full rows removes exactly `k * width` filled cells and
//!   keeps the surviving rows in their original order.
//! - `can_place` has no side effects.
//! - Four clockwise rotations restore any shape.
//! - Score only ever grows, in multiples of the per-line reward.

use blockfall_engine::{
    Cell, Color, Command, Engine, EngineConfig, Grid, Piece, PieceKind, PieceSeed, Shape,
};
use proptest::prelude::*;

const WIDTH: usize = 6;
const HEIGHT: usize = 8;

fn grid_from_bits(bits: &[Vec<bool>]) -> Grid {
    let rows: Vec<String> = bits
        .iter()
        .map(|row| row.iter().map(|&b| if b { '#' } else { '.' }).collect())
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    Grid::from_rows(&rows, Color::Orange)
}

fn row_pattern(row: &[Cell]) -> Vec<bool> {
    row.iter().map(|c| !c.is_empty()).collect()
}

fn any_grid_bits() -> impl Strategy<Value = Vec<Vec<bool>>> {
    // Bias toward full rows so clears actually happen.
    let row = prop_oneof![
        1 => Just(vec![true; WIDTH]),
        2 => prop::collection::vec(any::<bool>(), WIDTH),
    ];
    prop::collection::vec(row, HEIGHT)
}

fn any_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn any_command() -> impl Strategy<Value = Command> {
    prop::sample::select(Command::ALL.to_vec())
}

fn any_shape() -> impl Strategy<Value = Shape> {
    (1..=4usize, 1..=4usize)
        .prop_flat_map(|(rows, cols)| {
            prop::collection::vec(prop::collection::vec(any::<bool>(), cols), rows)
        })
        .prop_map(|rows| Shape::from_rows(&rows).unwrap())
}

proptest! {
    #[test]
    fn clear_full_rows_removes_whole_rows_in_order(bits in any_grid_bits()) {
        let mut grid = grid_from_bits(&bits);
        let before = grid.filled_count();
        let survivors: Vec<Vec<bool>> = bits
            .iter()
            .filter(|row| !row.iter().all(|&b| b))
            .cloned()
            .collect();

        let cleared = grid.clear_full_rows();

        prop_assert_eq!(cleared, HEIGHT - survivors.len());
        prop_assert_eq!(grid.filled_count(), before - cleared * WIDTH);
        prop_assert_eq!(grid.width(), WIDTH);
        prop_assert_eq!(grid.height(), HEIGHT);

        let after: Vec<Vec<bool>> = grid.rows().map(row_pattern).collect();
        let (top, bottom) = after.split_at(cleared);
        prop_assert!(top.iter().all(|row| row.iter().all(|&b| !b)));
        prop_assert_eq!(bottom, &survivors[..]);
    }

    #[test]
    fn can_place_is_pure(
        bits in any_grid_bits(),
        kind in any_kind(),
        x in -3..9i32,
        y in -3..10i32,
        dx in -2..=2i32,
        dy in -2..=2i32,
        rotate in any::<bool>(),
    ) {
        let grid = grid_from_bits(&bits);
        let piece = Piece::new(kind, x, y);
        let rotated = piece.rotated_shape();
        let shape = rotate.then_some(&rotated);
        let grid_before = grid.clone();

        let first = piece.can_place(&grid, dx, dy, shape);
        let second = piece.can_place(&grid, dx, dy, shape);

        prop_assert_eq!(first, second);
        prop_assert_eq!(&grid, &grid_before);
        prop_assert_eq!(piece, Piece::new(kind, x, y));
    }

    #[test]
    fn four_rotations_restore_shape(shape in any_shape()) {
        let once = shape.rotated_clockwise();
        prop_assert_eq!((once.rows(), once.cols()), (shape.cols(), shape.rows()));
        prop_assert_eq!(once.filled_cells().count(), shape.filled_cells().count());

        let mut rotated = shape;
        for _ in 0..4 {
            rotated = rotated.rotated_clockwise();
        }
        prop_assert_eq!(rotated, shape);
    }

    #[test]
    fn engine_invariants_hold_over_random_play(
        seed in any::<[u8; 16]>(),
        frames in prop::collection::vec(
            (0..700u64, prop::collection::vec(any_command(), 0..3)),
            1..300,
        ),
    ) {
        let config = EngineConfig::default();
        let mut engine = Engine::with_seed(config, PieceSeed::from_bytes(seed)).unwrap();

        for (elapsed_ms, commands) in frames {
            let score_before = engine.score();
            let was_over = engine.is_game_over();

            let report = engine.tick(elapsed_ms);
            for command in commands {
                let outcome = engine.apply_command(command);
                prop_assert_eq!(outcome.is_ignored(), engine.is_game_over());
            }

            prop_assert_eq!(engine.grid().width(), config.width);
            prop_assert_eq!(engine.grid().height(), config.height);
            prop_assert!(engine.score() >= score_before);
            prop_assert_eq!(engine.score() % config.points_per_line, 0);
            prop_assert_eq!(
                engine.score() - score_before,
                u64::try_from(report.lines_cleared).unwrap() * config.points_per_line
            );
            if was_over {
                prop_assert_eq!(report.gravity_steps, 0);
            } else if !engine.is_game_over() {
                prop_assert!(engine.current().can_place(engine.grid(), 0, 0, None));
                prop_assert!(engine.fall_accumulator_ms() < config.fall_interval_ms);
            }
        }
    }
}
