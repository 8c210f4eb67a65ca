//! Evolutionary tournament refining a trained network.
//!
//! The trainer runs a small state machine:
//!
//! ```text
//! Init -> Evaluate -> Select -> Reproduce -> Evaluate -> ... -> Finalize
//! ```
//!
//! 1. **Init** - the population is filled with clones of the current best
//!    network, each perturbed by one random [`Mutation`](crate::mutation::Mutation)
//! 2. **Evaluate** - a full round robin: every unordered pair plays a two-game
//!    [`Match`] and earns [`match_points`](crate::tournament::match_points);
//!    an agent's fitness is the sum of its points
//! 3. **Select** - agents are ranked by descending fitness (stable, so ties keep
//!    their previous order) and only the best `survivors` are kept
//! 4. **Reproduce** - the population is refilled with children. Child `c` is
//!    the crossover of the survivors ranked `c mod K` (father) and
//!    `(c + 1) mod K` (mother), mutated once with probability
//!    `child_mutation_rate`
//! 5. **Finalize** - once the budget has expired, the best agent of the last
//!    selection is adopted
//!
//! The deadline is only checked after a complete generation, so at least one
//! generation always runs and a running tournament is never abandoned halfway.
//!
//! # Key Components
//!
//! - [`Agent`] - a network together with its fitness
//! - [`Population`] - the agents of one generation and the genetic operators
//! - [`EvolutionTrainer`] - drives the state machine under a deadline

use std::time::Duration;

use awale_engine::{Board, Decision, Match, Player};
use awale_nn::{Network, NetworkError, activation::SharedActivation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, Deadline, EvolutionParams,
    bot::network_decision,
    mutation::Mutator,
    tournament::{RoundRobinSummary, round_robin},
};

/// A competitor of the tournament.
#[derive(Debug, Clone)]
pub struct Agent {
    network: Network,
    fitness: f64,
}

impl Agent {
    #[must_use]
    pub fn new(network: Network) -> Self {
        Self {
            network,
            fitness: 0.0,
        }
    }

    #[must_use]
    pub fn network(&self) -> &Network {
        &self.network
    }

    #[must_use]
    pub fn into_network(self) -> Network {
        self.network
    }

    /// Points earned in the last round robin.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }
}

impl Player for Agent {
    fn decide(&mut self, board: &Board) -> Decision {
        network_decision(&mut self.network, board)
    }
}

/// Min, max, mean and standard deviation of a generation's fitness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl FitnessStats {
    /// Returns `None` for an empty iterator.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }
        #[expect(clippy::cast_precision_loss)]
        let len = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / len;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / len;
        Some(Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

/// The agents of one generation.
#[derive(Debug, Clone, Default)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// `size` mutated clones of `best`.
    pub fn seeded<R>(
        best: &Network,
        size: usize,
        activation: &SharedActivation,
        mutator: &Mutator,
        rng: &mut R,
    ) -> Result<Self, NetworkError>
    where
        R: Rng + ?Sized,
    {
        let agents = (0..size)
            .map(|_| {
                let mut network = best.clone_with(SharedActivation::clone(activation));
                mutator.mutate(&mut network, rng)?;
                Ok(Agent::new(network))
            })
            .collect::<Result<_, NetworkError>>()?;
        Ok(Self { agents })
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Best agent of the last selection.
    #[must_use]
    pub fn best(&self) -> Option<&Agent> {
        self.agents.first()
    }

    /// Replaces every agent's fitness with its points in a fresh round robin.
    pub fn evaluate(&mut self, game_match: &Match) -> RoundRobinSummary {
        let (points, summary) = round_robin(&mut self.agents, game_match);
        for (agent, points) in self.agents.iter_mut().zip(points) {
            agent.fitness = f64::from(points);
        }
        summary
    }

    #[must_use]
    pub fn fitness_stats(&self) -> Option<FitnessStats> {
        FitnessStats::new(self.agents.iter().map(|agent| agent.fitness))
    }

    /// Ranks agents by descending fitness and keeps the first `survivors`.
    pub fn select(&mut self, survivors: usize) {
        self.agents.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        self.agents.truncate(survivors);
    }

    /// Breeds children from the current agents until there are `size` agents.
    ///
    /// Must follow [`select`](Self::select): parents are paired by rank.
    pub fn reproduce<R>(
        &mut self,
        size: usize,
        mutator: &Mutator,
        child_mutation_rate: f64,
        rng: &mut R,
    ) -> Result<(), NetworkError>
    where
        R: Rng + ?Sized,
    {
        let survivors = self.agents.len();
        if survivors == 0 {
            return Ok(());
        }
        for c in 0..size.saturating_sub(survivors) {
            let father = &self.agents[c % survivors].network;
            let mother = &self.agents[(c + 1) % survivors].network;
            let mut child = Network::crossover(father, mother)?;
            if rng.random_bool(child_mutation_rate) {
                mutator.mutate(&mut child, rng)?;
            }
            self.agents.push(Agent::new(child));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EvolutionPhase {
    Init,
    Evaluate,
    Select,
    Reproduce,
    Finalize,
}

/// Record of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: usize,
    pub fitness: FitnessStats,
    pub round_robin: RoundRobinSummary,
}

/// Outcome of an evolutionary pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub generations: usize,
    pub games: usize,
    pub forfeits: usize,
    /// Fitness of the adopted agent.
    pub best_fitness: f64,
    pub history: Vec<GenerationSummary>,
    pub elapsed: Duration,
}

impl EvolutionReport {
    fn record(&mut self, fitness: FitnessStats, round_robin: RoundRobinSummary) {
        self.generations += 1;
        self.games += round_robin.games;
        self.forfeits += round_robin.forfeits;
        log::info!(
            "generation {}: fitness max {:.0} mean {:.1} min {:.0} sd {:.1} ({} games, {} forfeits)",
            self.generations,
            fitness.max,
            fitness.mean,
            fitness.min,
            fitness.std_dev,
            round_robin.games,
            round_robin.forfeits,
        );
        self.history.push(GenerationSummary {
            generation: self.generations,
            fitness,
            round_robin,
        });
    }
}

#[derive(Debug, Clone)]
pub struct EvolutionTrainer {
    params: EvolutionParams,
    activation: SharedActivation,
    mutator: Mutator,
}

impl EvolutionTrainer {
    pub fn new(params: EvolutionParams, activation: SharedActivation) -> Result<Self, ConfigError> {
        params.validate()?;
        let mutator = Mutator::new(params.mutation_bound)?;
        Ok(Self {
            params,
            activation,
            mutator,
        })
    }

    #[must_use]
    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    /// Evolves a population grown from `best` until the budget expires.
    ///
    /// Returns the adopted network, using this trainer's activation function.
    pub fn run<R>(
        &self,
        best: &Network,
        rng: &mut R,
    ) -> Result<(Network, EvolutionReport), NetworkError>
    where
        R: Rng + ?Sized,
    {
        let params = &self.params;
        let deadline = Deadline::after(params.budget);
        let game_match = Match::new(params.move_limit);
        let mut report = EvolutionReport::default();
        let mut population = Population::default();
        let mut last_round = RoundRobinSummary::default();

        let mut phase = EvolutionPhase::Init;
        while phase != EvolutionPhase::Finalize {
            log::trace!("evolution phase {phase}");
            phase = match phase {
                EvolutionPhase::Init => {
                    population = Population::seeded(
                        best,
                        params.population_size,
                        &self.activation,
                        &self.mutator,
                        rng,
                    )?;
                    EvolutionPhase::Evaluate
                }
                EvolutionPhase::Evaluate => {
                    last_round = population.evaluate(&game_match);
                    EvolutionPhase::Select
                }
                EvolutionPhase::Select => {
                    if let Some(fitness) = population.fitness_stats() {
                        report.record(fitness, last_round);
                    }
                    population.select(params.survivors);
                    EvolutionPhase::Reproduce
                }
                EvolutionPhase::Reproduce => {
                    population.reproduce(
                        params.population_size,
                        &self.mutator,
                        params.child_mutation_rate,
                        rng,
                    )?;
                    if deadline.is_expired() {
                        EvolutionPhase::Finalize
                    } else {
                        EvolutionPhase::Evaluate
                    }
                }
                EvolutionPhase::Finalize => EvolutionPhase::Finalize,
            };
        }

        let network = match population.best() {
            Some(agent) => {
                report.best_fitness = agent.fitness;
                agent.network.clone_with(SharedActivation::clone(&self.activation))
            }
            None => best.clone_with(SharedActivation::clone(&self.activation)),
        };
        report.elapsed = deadline.elapsed();
        log::info!(
            "evolution finished after {} generations in {:?}, best fitness {:.0}",
            report.generations,
            report.elapsed,
            report.best_fitness
        );
        Ok((network, report))
    }
}
