use std::{fmt, sync::Arc};

use awale_engine::{Board, Bot, BotIdentity, Dataset, Decision, NB_HOLES, Player};
use awale_nn::{Network, NetworkError, Topology};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, TrainingConfig,
    genetic::{EvolutionReport, EvolutionTrainer},
    supervised::{SupervisedError, SupervisedReport, SupervisedTrainer},
};

pub const NETWORK_BOT_NAME: &str = "network";
const AUTHOR: &str = "awale";

/// Confidences of `network` for the side to move on `board`.
///
/// A network that cannot evaluate the board yields NaN confidences, which the
/// engine turns into a forfeit.
pub(crate) fn network_decision(network: &mut Network, board: &Board) -> Decision {
    match network.predict(&board.features()) {
        Ok(output) => match <Decision>::try_from(output.as_slice()) {
            Ok(decision) => decision,
            Err(_) => {
                log::warn!("network produced {} confidences, expected {NB_HOLES}", output.len());
                [f64::NAN; NB_HOLES]
            }
        },
        Err(err) => {
            log::warn!("network failed to evaluate board: {err}");
            [f64::NAN; NB_HOLES]
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingError {
    #[display("invalid training configuration")]
    Config(ConfigError),
    #[display("supervised pass failed")]
    Supervised(SupervisedError),
    #[display("evolutionary pass failed")]
    Network(NetworkError),
}

/// What [`NetworkBot::train`] did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub topology: Topology,
    pub supervised: SupervisedReport,
    pub evolution: EvolutionReport,
}

/// A bot whose moves are the confidences of a trained network.
///
/// Training bootstraps the network on the historical dataset, then refines it
/// through the evolutionary tournament.
///
/// # Example
///
/// ```
/// use std::{sync::Arc, time::Duration};
///
/// use awale_engine::{Board, Bot, Dataset, Player, Side};
/// use awale_nn::Topology;
/// use awale_training::{NetworkBot, TrainingConfig};
///
/// let mut config = TrainingConfig::default();
/// config.topology = Topology::new(12, 1, 8, 6);
/// config.evolution.population_size = 4;
/// config.evolution.survivors = 2;
/// config.evolution.budget = Duration::ZERO;
/// config.seed = Some(1);
///
/// let mut bot = NetworkBot::new(config, Arc::new(Dataset::default())).unwrap();
/// bot.learn();
/// assert_eq!(bot.report().unwrap().evolution.generations, 1);
///
/// let board = Board::new();
/// let decision = bot.decide(&board);
/// assert!(board.select_move(Side::South, &decision).is_some());
/// ```
pub struct NetworkBot {
    identity: BotIdentity,
    config: TrainingConfig,
    network: Network,
    dataset: Arc<Dataset>,
    rng: Pcg32,
    report: Option<TrainingReport>,
}

impl fmt::Debug for NetworkBot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkBot")
            .field("identity", &self.identity)
            .field("topology", &self.network.topology())
            .field("observations", &self.dataset.len())
            .finish_non_exhaustive()
    }
}

impl NetworkBot {
    pub fn new(config: TrainingConfig, dataset: Arc<Dataset>) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = config.rng();
        let network = Network::random(
            config.topology,
            config.learning_rate,
            config.activation.shared(),
            &mut rng,
        )?;
        Ok(Self {
            identity: BotIdentity::new(NETWORK_BOT_NAME, AUTHOR),
            config,
            network,
            dataset,
            rng,
            report: None,
        })
    }

    #[must_use]
    pub fn with_identity(mut self, identity: BotIdentity) -> Self {
        self.identity = identity;
        self
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    #[must_use]
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Report of the last successful [`train`](Self::train).
    #[must_use]
    pub fn report(&self) -> Option<&TrainingReport> {
        self.report.as_ref()
    }

    /// Runs the supervised pass, then the evolutionary pass.
    pub fn train(&mut self) -> Result<&TrainingReport, TrainingError> {
        log::info!(
            "{}: supervised pass over {} observations",
            self.identity,
            self.dataset.len()
        );
        let supervised =
            SupervisedTrainer::new(self.config.supervised).train(&mut self.network, &self.dataset)?;

        log::info!(
            "{}: evolutionary pass with {} agents",
            self.identity,
            self.config.evolution.population_size
        );
        let trainer = EvolutionTrainer::new(self.config.evolution, self.config.activation.shared())?;
        let mut rng = Pcg32::seed_from_u64(self.rng.random());
        let (network, evolution) = trainer.run(&self.network, &mut rng)?;
        self.network = network;

        Ok(self.report.insert(TrainingReport {
            topology: self.config.topology,
            supervised,
            evolution,
        }))
    }
}

impl Player for NetworkBot {
    fn decide(&mut self, board: &Board) -> Decision {
        network_decision(&mut self.network, board)
    }
}

impl Bot for NetworkBot {
    fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    fn learn(&mut self) {
        match self.train() {
            Ok(report) => log::info!(
                "trained for {} supervised epochs and {} generations",
                report.supervised.epochs,
                report.evolution.generations
            ),
            Err(err) => log::error!("{}: training failed: {err}", self.identity),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use awale_engine::{Match, Observation, Side, bots::RandomBot};

    use super::*;

    fn config(seed: u64) -> TrainingConfig {
        let mut config = TrainingConfig {
            topology: Topology::new(12, 2, 6, 6),
            seed: Some(seed),
            ..TrainingConfig::default()
        };
        config.supervised.budget = Duration::from_secs(60);
        config.evolution.population_size = 4;
        config.evolution.survivors = 2;
        config.evolution.budget = Duration::ZERO;
        config
    }

    fn dataset() -> Arc<Dataset> {
        let observation = Observation {
            player_holes: [4; NB_HOLES],
            opponent_holes: [4; NB_HOLES],
            move_number: 4,
            won: true,
        };
        Arc::new(Dataset::new(vec![observation; 3]))
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = config(0);
        config.topology = Topology::new(10, 1, 4, 6);
        assert!(matches!(
            NetworkBot::new(config, dataset()),
            Err(ConfigError::IncompatibleTopology { .. })
        ));
    }

    #[test]
    fn test_learn_records_report() {
        let mut bot = NetworkBot::new(config(1), dataset()).unwrap();
        assert!(bot.report().is_none());
        bot.learn();
        let report = bot.report().unwrap();
        assert_eq!(report.supervised.observations, 3);
        assert_eq!(report.supervised.epochs, 1);
        assert_eq!(report.evolution.generations, 1);
        assert_eq!(report.topology, Topology::new(12, 2, 6, 6));
    }

    #[test]
    fn test_seeded_bots_train_identically() {
        let mut a = NetworkBot::new(config(2), dataset()).unwrap();
        let mut b = NetworkBot::new(config(2), dataset()).unwrap();
        a.learn();
        b.learn();
        let board = Board::new();
        assert_eq!(a.decide(&board), b.decide(&board));
    }

    #[test]
    fn test_trained_bot_opens_with_a_legal_move() {
        let mut bot = NetworkBot::new(config(3), dataset()).unwrap();
        bot.learn();
        let board = Board::new();
        let decision = bot.decide(&board);
        assert!(decision.iter().all(|confidence| confidence.is_finite()));
        assert!(board.select_move(Side::South, &decision).is_some());

        let mut opponent = RandomBot::with_seed(3);
        let outcome = Match::default().play([&mut bot, &mut opponent]);
        assert!(outcome.moves() >= 2);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut bot = NetworkBot::new(config(4), dataset()).unwrap();
        let report = bot.train().unwrap().clone();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["evolution"]["generations"], 1);
        assert_eq!(json["topology"]["hidden_width"], 6);
    }
}
