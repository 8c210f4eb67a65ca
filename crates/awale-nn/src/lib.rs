//! Small fully-connected feed-forward networks with manual backpropagation.
//!
//! A [`Network`] is an input layer, `H` hidden layers of equal width and an
//! output layer. Every weighted layer stores its weights as one contiguous
//! row-major matrix (one row per neuron, one column per upstream neuron), so
//! cloning is a plain deep copy and no layer refers to another.
//!
//! - [`activation`] - pluggable activation functions
//! - [`Topology`] - the immutable shape of a network
//! - [`Network`] - inference, training, cloning, mutation and crossover
//!
//! # Example
//!
//! ```
//! use awale_nn::{Network, Topology, activation};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(0);
//! let topology = Topology::new(2, 1, 3, 1);
//! let mut network = Network::random(topology, 0.5, activation::sigmoid(), &mut rng).unwrap();
//!
//! let before = network.squared_error(&[1.0, 0.0], &[1.0]).unwrap();
//! for _ in 0..100 {
//!     network.train(&[1.0, 0.0], &[1.0]).unwrap();
//! }
//! assert!(network.squared_error(&[1.0, 0.0], &[1.0]).unwrap() < before);
//! ```

pub use self::{network::*, topology::*};

pub mod activation;
mod network;
mod topology;

/// Which vector a [`NetworkError::DimensionMismatch`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum VectorKind {
    #[display("features")]
    Features,
    #[display("target")]
    Target,
    #[display("weights")]
    Weights,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum NetworkError {
    #[display("{kind} vector has length {found}, expected {expected}")]
    DimensionMismatch {
        kind: VectorKind,
        expected: usize,
        found: usize,
    },
    #[display("invalid topology: {reason}")]
    InvalidTopology {
        #[error(not(source))]
        reason: &'static str,
    },
    #[display("learning rate must be finite and positive, got {_0}")]
    InvalidLearningRate(#[error(not(source))] f64),
    #[display("no neuron {neuron} in layer {layer}")]
    IndexOutOfRange { layer: usize, neuron: usize },
    #[display("parents have different topologies")]
    TopologyMismatch,
}
