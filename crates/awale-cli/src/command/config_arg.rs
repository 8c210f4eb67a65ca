use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use awale_engine::{DEFAULT_MOVE_LIMIT, Dataset};
use awale_nn::{DEFAULT_LEARNING_RATE, activation::ActivationKind};
use awale_training::{
    DEFAULT_CHILD_MUTATION_RATE, DEFAULT_HIDDEN_LAYERS, DEFAULT_HIDDEN_WIDTH,
    DEFAULT_MUTATION_BOUND, DEFAULT_POPULATION_SIZE, DEFAULT_SUPERVISED_EPOCHS, DEFAULT_SURVIVORS,
    DEFAULT_TOPOLOGY, EvolutionParams, SupervisedParams, TrainingConfig,
};

use crate::{registry::BotContext, util::parse_seconds};

/// Flags shared by every command that may train a network bot.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainingConfigArg {
    /// Historical games (comma-separated text, or JSON with a `.json` extension)
    #[arg(long)]
    data: Option<PathBuf>,
    /// Seed for every random draw
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_HIDDEN_LAYERS)]
    hidden_layers: usize,
    #[arg(long, default_value_t = DEFAULT_HIDDEN_WIDTH)]
    hidden_width: usize,
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    learning_rate: f64,
    #[arg(long, default_value_t = ActivationKind::Sigmoid)]
    activation: ActivationKind,
    /// Maximum passes over the historical games
    #[arg(long, default_value_t = DEFAULT_SUPERVISED_EPOCHS)]
    epochs: usize,
    /// Time budget of the supervised pass, in seconds
    #[arg(long, value_parser = parse_seconds, default_value = "5")]
    supervised_secs: Duration,
    /// Time budget of the evolutionary pass, in seconds
    #[arg(long, value_parser = parse_seconds, default_value = "10")]
    evolution_secs: Duration,
    #[arg(long, default_value_t = DEFAULT_POPULATION_SIZE)]
    population: usize,
    #[arg(long, default_value_t = DEFAULT_SURVIVORS)]
    survivors: usize,
    #[arg(long, default_value_t = DEFAULT_MUTATION_BOUND)]
    mutation_bound: f64,
    #[arg(long, default_value_t = DEFAULT_CHILD_MUTATION_RATE)]
    child_mutation_rate: f64,
    /// Moves after which a game is scored as it stands
    #[arg(long, default_value_t = DEFAULT_MOVE_LIMIT)]
    move_limit: usize,
}

impl TrainingConfigArg {
    pub(crate) fn move_limit(&self) -> usize {
        self.move_limit
    }

    pub(crate) fn to_config(&self) -> TrainingConfig {
        let mut topology = DEFAULT_TOPOLOGY;
        topology.hidden_layers = self.hidden_layers;
        topology.hidden_width = self.hidden_width;
        TrainingConfig {
            topology,
            learning_rate: self.learning_rate,
            activation: self.activation,
            supervised: SupervisedParams {
                epochs: self.epochs,
                budget: self.supervised_secs,
            },
            evolution: EvolutionParams {
                population_size: self.population,
                survivors: self.survivors,
                mutation_bound: self.mutation_bound,
                child_mutation_rate: self.child_mutation_rate,
                move_limit: self.move_limit,
                budget: self.evolution_secs,
            },
            seed: self.seed,
        }
    }

    pub(crate) fn load_dataset(&self) -> anyhow::Result<Arc<Dataset>> {
        let Some(path) = &self.data else {
            log::warn!("no historical games given, the supervised pass is skipped");
            return Ok(Arc::default());
        };
        let dataset = Dataset::open(path)
            .with_context(|| format!("Failed to load historical games: {}", path.display()))?;
        eprintln!("Loaded {} observations from {}", dataset.len(), path.display());
        Ok(Arc::new(dataset))
    }

    pub(crate) fn to_context(&self) -> anyhow::Result<BotContext> {
        Ok(BotContext {
            config: self.to_config(),
            dataset: self.load_dataset()?,
        })
    }
}
