use clap::{Parser, Subcommand};

use self::{play::PlayArg, tournament::TournamentArg, train::TrainArg};

mod config_arg;
mod play;
mod tournament;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Train a network bot and export its training report as JSON
    Train(#[clap(flatten)] TrainArg),
    /// Play one match between two registered bots
    Play(#[clap(flatten)] PlayArg),
    /// Rank registered bots in a round robin
    Tournament(#[clap(flatten)] TournamentArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Tournament(arg) => tournament::run(&arg)?,
    }
    Ok(())
}
