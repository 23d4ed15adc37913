use clap::{Parser, Subcommand};

use self::{run::RunArg, shapes::ShapesArg};

mod run;
mod shapes;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run a headless game from a seed and a scripted command stream
    Run(#[clap(flatten)] RunArg),
    /// Print every tetromino with its color and rotations
    Shapes(#[clap(flatten)] ShapesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Run(RunArg::default())) {
        Mode::Run(arg) => run::run(&arg)?,
        Mode::Shapes(arg) => shapes::run(&arg),
    }
    Ok(())
}
