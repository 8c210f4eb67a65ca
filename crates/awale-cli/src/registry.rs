//! Bots available to the `play` and `tournament` commands.
//!
//! Bots are listed explicitly in [`REGISTRY`]; adding one means adding a row.

use std::sync::Arc;

use anyhow::Context as _;
use awale_engine::{
    Bot, Dataset,
    bots::{FirstMoveBot, GreedyBot, RandomBot},
};
use awale_training::{NetworkBot, TrainingConfig};

/// What a factory may need to build its bot.
#[derive(Debug, Clone)]
pub struct BotContext {
    pub config: TrainingConfig,
    pub dataset: Arc<Dataset>,
}

pub type BotFactory = fn(&BotContext) -> anyhow::Result<Box<dyn Bot>>;

pub const REGISTRY: &[(&str, BotFactory)] = &[
    ("network", network_bot),
    ("random", random_bot),
    ("greedy", greedy_bot),
    ("first", first_bot),
];

pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

pub fn create(name: &str, context: &BotContext) -> anyhow::Result<Box<dyn Bot>> {
    let (_, factory) = REGISTRY
        .iter()
        .find(|(registered, _)| *registered == name)
        .with_context(|| {
            format!(
                "Unknown bot `{name}` (available: {})",
                names().collect::<Vec<_>>().join(", ")
            )
        })?;
    factory(context)
}

fn network_bot(context: &BotContext) -> anyhow::Result<Box<dyn Bot>> {
    let bot = NetworkBot::new(context.config.clone(), Arc::clone(&context.dataset))
        .context("Invalid network bot configuration")?;
    Ok(Box::new(bot))
}

fn random_bot(context: &BotContext) -> anyhow::Result<Box<dyn Bot>> {
    let bot = match context.config.seed {
        Some(seed) => RandomBot::with_seed(seed),
        None => RandomBot::new(),
    };
    Ok(Box::new(bot))
}

fn greedy_bot(_context: &BotContext) -> anyhow::Result<Box<dyn Bot>> {
    Ok(Box::new(GreedyBot::new()))
}

fn first_bot(_context: &BotContext) -> anyhow::Result<Box<dyn Bot>> {
    Ok(Box::new(FirstMoveBot::new()))
}
