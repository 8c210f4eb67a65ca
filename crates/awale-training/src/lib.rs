//! Training pipeline for network-driven Awale bots.
//!
//! A [`NetworkBot`] learns in two passes:
//!
//! 1. **Supervised bootstrapping** ([`supervised`]) - one pass (or more) over
//!    historical observations, pulling the confidence of each recorded move
//!    towards the outcome of its game
//! 2. **Evolutionary refinement** ([`genetic`]) - a population of mutated
//!    clones plays round-robin tournaments; the best agents survive and breed
//!    by layer crossover until the time budget runs out
//!
//! # Architecture
//!
//! ```text
//! Dataset (awale-engine)
//!     ↓ supervised targets
//! Network (awale-nn)
//!     ↓ cloned and mutated into
//! Population of Agents
//!     ↓ round robin (awale-engine Match)
//! Fitness
//!     ↓ guides
//! Selection & Reproduction
//!     ↓ after the deadline
//! Best network adopted by the bot
//! ```
//!
//! Both passes are bounded by wall-clock budgets ([`Deadline`]) polled between
//! units of work. All randomness flows from the seed in [`TrainingConfig`],
//! so seeded runs are reproducible.

pub use self::{bot::*, config::*, deadline::*};

mod bot;
mod config;
mod deadline;
pub mod genetic;
pub mod mutation;
pub mod supervised;
pub mod tournament;
