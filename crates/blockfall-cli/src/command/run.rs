use std::{io, path::PathBuf};

use anyhow::{Context as _, anyhow};
use blockfall_engine::{
    Command, Engine, EngineConfig, EngineSnapshot, PieceKind, PieceSeed, PieceSource,
    ScriptedSource, UniformSource,
};
use rand::Rng as _;
use serde::Serialize;

use crate::{util, view};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    /// Seed for the random piece sequence (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Use a fixed, repeating piece sequence such as `IOTSZJL` instead of random pieces
    #[clap(long, conflicts_with = "seed")]
    pieces: Option<String>,
    /// Engine config file (JSON)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[clap(long, default_value_t = 200)]
    frames: usize,
    /// Milliseconds elapsed per frame
    #[clap(long, default_value_t = 16)]
    frame_ms: u64,
    /// Commands per frame, frames separated by `,` (L left, R right, D down, U rotate, . none)
    #[clap(long, default_value = "")]
    commands: String,
    /// Print the final state as JSON instead of a text board
    #[clap(long)]
    json: bool,
}

impl Default for RunArg {
    fn default() -> Self {
        Self {
            seed: None,
            pieces: None,
            config: None,
            frames: 200,
            frame_ms: 16,
            commands: String::new(),
            json: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct RunOutput {
    seed: Option<PieceSeed>,
    frames: usize,
    snapshot: EngineSnapshot,
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let RunArg {
        seed,
        pieces,
        config,
        frames,
        frame_ms,
        commands,
        json,
    } = arg;

    let config = match config {
        Some(path) => util::read_config_file(path)?,
        None => EngineConfig::default(),
    };
    let script = parse_script(commands)?;

    let (source, seed) = match pieces {
        Some(pieces) => {
            let kinds = PieceKind::parse_sequence(pieces).context("Invalid --pieces")?;
            let source =
                ScriptedSource::new(kinds).context("--pieces must name at least one piece")?;
            (Box::new(source) as Box<dyn PieceSource>, None)
        }
        None => {
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            eprintln!("Seed: {seed}");
            (
                Box::new(UniformSource::with_seed(seed)) as Box<dyn PieceSource>,
                Some(seed),
            )
        }
    };
    eprintln!(
        "Config: {}x{} grid, {} ms fall interval, {} points per line",
        config.width, config.height, config.fall_interval_ms, config.points_per_line
    );

    let mut engine = Engine::with_source(config, source)?;
    let mut frames_run = 0;
    for frame in 0..*frames {
        if engine.is_game_over() {
            break;
        }
        engine.tick(*frame_ms);
        for &command in script.get(frame).map_or(&[][..], Vec::as_slice) {
            engine.apply_command(command);
        }
        frames_run += 1;
    }

    let stats = engine.stats();
    eprintln!(
        "Ran {frames_run} frames: {} pieces locked, {} lines cleared, score {}{}",
        stats.completed_pieces(),
        stats.total_cleared_lines(),
        stats.score(),
        if engine.is_game_over() { " (game over)" } else { "" },
    );

    let snapshot = engine.snapshot();
    if *json {
        let output = RunOutput {
            seed,
            frames: frames_run,
            snapshot,
        };
        serde_json::to_writer_pretty(io::stdout().lock(), &output)
            .context("Failed to write JSON to stdout")?;
        println!();
    } else {
        print!("{}", view::render(&snapshot));
    }
    Ok(())
}

/// Parses a command script into one list of commands per frame.
fn parse_script(script: &str) -> anyhow::Result<Vec<Vec<Command>>> {
    if script.trim().is_empty() {
        return Ok(vec![]);
    }
    script
        .split(',')
        .enumerate()
        .map(|(frame, group)| {
            group
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '.')
                .map(|c| {
                    Command::from_char(c).ok_or_else(|| {
                        anyhow!("Invalid command {c:?} in frame {frame} of --commands")
                    })
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .collect()
}
