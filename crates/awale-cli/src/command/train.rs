use std::{path::PathBuf, time::Instant};

use anyhow::Context as _;
use awale_engine::Bot as _;
use awale_training::NetworkBot;
use chrono::Utc;

use crate::{model::summary::TrainingSummary, util::Output};

use super::config_arg::TrainingConfigArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    #[clap(flatten)]
    config: TrainingConfigArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg { config, output } = arg;
    let dataset = config.load_dataset()?;
    let config = config.to_config();

    let mut bot = NetworkBot::new(config.clone(), dataset)
        .context("Invalid training configuration")?;
    eprintln!("Training {} with topology {:?}", bot.identity(), config.topology);

    let start = Instant::now();
    let report = bot.train().context("Training failed")?.clone();
    let elapsed = start.elapsed();

    eprintln!("Supervised pass:");
    eprintln!("  Epochs:       {}", report.supervised.epochs);
    eprintln!("  Observations: {}", report.supervised.observations);
    if let Some(mse) = report.supervised.mean_squared_error {
        eprintln!("  Last MSE:     {mse:.6}");
    }
    if report.supervised.interrupted {
        eprintln!("  (stopped by its time budget)");
    }

    eprintln!("Evolutionary pass:");
    eprintln!("  Generations:  {}", report.evolution.generations);
    eprintln!("  Games:        {}", report.evolution.games);
    eprintln!("  Forfeits:     {}", report.evolution.forfeits);
    eprintln!("  Best fitness: {:.0}", report.evolution.best_fitness);
    if let Some(last) = report.evolution.history.last() {
        eprintln!(
            "  Last generation fitness: min {:.0} / mean {:.1} / max {:.0} (sd {:.1})",
            last.fitness.min, last.fitness.mean, last.fitness.max, last.fitness.std_dev
        );
    }
    eprintln!("Training completed in {elapsed:.2?}");

    let summary = TrainingSummary {
        bot: bot.identity().clone(),
        trained_at: Utc::now(),
        config,
        report,
    };
    Output::save_json(&summary, output.as_deref())?;

    if let Some(path) = output {
        eprintln!("Report saved to {}", path.display());
    }
    Ok(())
}
