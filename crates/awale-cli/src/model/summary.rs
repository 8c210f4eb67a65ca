use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use awale_engine::BotIdentity;
use awale_training::{TrainingConfig, TrainingReport};

/// Output of `awale train`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub bot: BotIdentity,
    pub trained_at: DateTime<Utc>,
    pub config: TrainingConfig,
    pub report: TrainingReport,
}

/// One line of the `awale tournament` ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: usize,
    pub bot: String,
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

/// Output of `awale tournament`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub played_at: DateTime<Utc>,
    pub runs: usize,
    pub standings: Vec<Standing>,
}
