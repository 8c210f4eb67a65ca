//! Training parameters.
//!
//! Every knob of the pipeline lives in [`TrainingConfig`]: the network shape,
//! the supervised pass and the evolutionary pass. Defaults reproduce the
//! reference setup (12 inputs, five hidden layers of 20 neurons, 6 outputs,
//! population of 30 keeping the best 20).

use std::time::Duration;

use awale_engine::{DEFAULT_MOVE_LIMIT, NB_HOLES, features::FEATURE_COUNT};
use awale_nn::{DEFAULT_LEARNING_RATE, NetworkError, Topology, activation::ActivationKind};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HIDDEN_LAYERS: usize = 5;
pub const DEFAULT_HIDDEN_WIDTH: usize = 20;
pub const DEFAULT_TOPOLOGY: Topology = Topology::new(
    FEATURE_COUNT,
    DEFAULT_HIDDEN_LAYERS,
    DEFAULT_HIDDEN_WIDTH,
    NB_HOLES,
);

pub const DEFAULT_SUPERVISED_EPOCHS: usize = 1;
pub const DEFAULT_SUPERVISED_BUDGET: Duration = Duration::from_secs(5);

pub const DEFAULT_POPULATION_SIZE: usize = 30;
pub const DEFAULT_SURVIVORS: usize = 20;
pub const DEFAULT_MUTATION_BOUND: f64 = 0.001;
pub const DEFAULT_CHILD_MUTATION_RATE: f64 = 0.5;
pub const DEFAULT_EVOLUTION_BUDGET: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("invalid network parameters")]
    Network(NetworkError),
    #[display(
        "network must map {FEATURE_COUNT} features to {NB_HOLES} confidences, got {inputs} -> {outputs}"
    )]
    #[from(ignore)]
    IncompatibleTopology { inputs: usize, outputs: usize },
    #[display("population size must be at least 2, got {_0}")]
    #[from(ignore)]
    PopulationTooSmall(#[error(not(source))] usize),
    #[display("survivors must be in 2..={population_size}, got {survivors}")]
    #[from(ignore)]
    InvalidSurvivors {
        survivors: usize,
        population_size: usize,
    },
    #[display("mutation bound must be finite and non-negative, got {_0}")]
    #[from(ignore)]
    InvalidMutationBound(#[error(not(source))] f64),
    #[display("child mutation rate must be in [0, 1], got {_0}")]
    #[from(ignore)]
    InvalidMutationRate(#[error(not(source))] f64),
    #[display("move limit must be positive")]
    ZeroMoveLimit,
}

/// Parameters of the supervised pass over the historical dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupervisedParams {
    /// Maximum number of passes over the dataset.
    pub epochs: usize,
    /// Wall-clock budget, checked after every observation.
    pub budget: Duration,
}

impl Default for SupervisedParams {
    fn default() -> Self {
        Self {
            epochs: DEFAULT_SUPERVISED_EPOCHS,
            budget: DEFAULT_SUPERVISED_BUDGET,
        }
    }
}

/// Parameters of the evolutionary tournament.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionParams {
    /// Agents per generation.
    pub population_size: usize,
    /// Agents kept by selection; the rest of the population is bred from them.
    pub survivors: usize,
    /// Mutation deltas are drawn uniformly from `[-mutation_bound, mutation_bound]`.
    pub mutation_bound: f64,
    /// Probability that a freshly bred child is mutated once.
    pub child_mutation_rate: f64,
    /// Moves after which a tournament game is scored as it stands.
    pub move_limit: usize,
    /// Wall-clock budget, checked after every generation.
    pub budget: Duration,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            survivors: DEFAULT_SURVIVORS,
            mutation_bound: DEFAULT_MUTATION_BOUND,
            child_mutation_rate: DEFAULT_CHILD_MUTATION_RATE,
            move_limit: DEFAULT_MOVE_LIMIT,
            budget: DEFAULT_EVOLUTION_BUDGET,
        }
    }
}

impl EvolutionParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if !(2..=self.population_size).contains(&self.survivors) {
            return Err(ConfigError::InvalidSurvivors {
                survivors: self.survivors,
                population_size: self.population_size,
            });
        }
        if !self.mutation_bound.is_finite() || self.mutation_bound < 0.0 {
            return Err(ConfigError::InvalidMutationBound(self.mutation_bound));
        }
        if !(0.0..=1.0).contains(&self.child_mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.child_mutation_rate));
        }
        if self.move_limit == 0 {
            return Err(ConfigError::ZeroMoveLimit);
        }
        Ok(())
    }
}

/// Complete configuration of a [`NetworkBot`](crate::NetworkBot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub topology: Topology,
    pub learning_rate: f64,
    pub activation: ActivationKind,
    pub supervised: SupervisedParams,
    pub evolution: EvolutionParams,
    /// Seed of every random draw; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            topology: DEFAULT_TOPOLOGY,
            learning_rate: DEFAULT_LEARNING_RATE,
            activation: ActivationKind::default(),
            supervised: SupervisedParams::default(),
            evolution: EvolutionParams::default(),
            seed: None,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.topology.validate()?;
        if self.topology.inputs != FEATURE_COUNT || self.topology.outputs != NB_HOLES {
            return Err(ConfigError::IncompatibleTopology {
                inputs: self.topology.inputs,
                outputs: self.topology.outputs,
            });
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetworkError::InvalidLearningRate(self.learning_rate).into());
        }
        self.evolution.validate()
    }

    /// Random generator for this configuration.
    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        match self.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;

    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TrainingConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.topology, Topology::new(12, 5, 20, 6));
        assert_eq!(config.evolution.population_size, 30);
        assert_eq!(config.evolution.survivors, 20);
    }

    #[test]
    fn test_rejects_survivors_out_of_range() {
        let mut config = TrainingConfig::default();
        for survivors in [0, 1, 31] {
            config.evolution.survivors = survivors;
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidSurvivors {
                    survivors,
                    population_size: 30
                })
            );
        }
    }

    #[test]
    fn test_rejects_bad_network_parameters() {
        let mut config = TrainingConfig {
            learning_rate: 0.0,
            ..TrainingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Network(_))));

        config.learning_rate = DEFAULT_LEARNING_RATE;
        config.topology.hidden_width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Network(_))));

        config.topology = Topology::new(12, 1, 4, 3);
        assert_eq!(
            config.validate(),
            Err(ConfigError::IncompatibleTopology {
                inputs: 12,
                outputs: 3
            })
        );
    }

    #[test]
    fn test_rejects_bad_mutation_parameters() {
        let mut params = EvolutionParams {
            mutation_bound: f64::NAN,
            ..EvolutionParams::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::InvalidMutationBound(_))));
        params.mutation_bound = 0.0;
        params.child_mutation_rate = 1.5;
        assert_eq!(params.validate(), Err(ConfigError::InvalidMutationRate(1.5)));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = TrainingConfig {
            seed: Some(42),
            ..TrainingConfig::default()
        };
        assert_eq!(config.rng().random::<u64>(), config.rng().random::<u64>());
    }
}
