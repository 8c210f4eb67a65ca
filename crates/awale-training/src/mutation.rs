//! Random perturbation of a single neuron.
//!
//! A [`Mutation`] shifts every incoming weight of one neuron by the same delta.
//! The [`Mutator`] picks the neuron uniformly (first the weighted layer, then
//! a neuron of that layer) and draws the delta uniformly from
//! `[-bound, bound]`.

use awale_nn::{Network, NetworkError, Topology};
use rand::Rng;
use rand_distr::{Distribution as _, Uniform};

use crate::ConfigError;

/// One neuron-wide weight shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mutation {
    pub layer: usize,
    pub neuron: usize,
    pub delta: f64,
}

impl Mutation {
    pub fn apply(&self, network: &mut Network) -> Result<(), NetworkError> {
        network.mutate(self.layer, self.neuron, self.delta)
    }
}

#[derive(Debug, Clone)]
pub struct Mutator {
    deltas: Uniform<f64>,
}

impl Mutator {
    pub fn new(bound: f64) -> Result<Self, ConfigError> {
        let deltas = Uniform::new_inclusive(-bound, bound)
            .map_err(|_| ConfigError::InvalidMutationBound(bound))?;
        Ok(Self { deltas })
    }

    /// Draws a mutation for a network of the given shape.
    pub fn sample<R>(&self, topology: &Topology, rng: &mut R) -> Mutation
    where
        R: Rng + ?Sized,
    {
        let layer = rng.random_range(0..topology.layer_count());
        let width = if layer < topology.hidden_layers {
            topology.hidden_width
        } else {
            topology.outputs
        };
        Mutation {
            layer,
            neuron: rng.random_range(0..width),
            delta: self.deltas.sample(rng),
        }
    }

    /// Draws a mutation for `network` and applies it.
    pub fn mutate<R>(&self, network: &mut Network, rng: &mut R) -> Result<Mutation, NetworkError>
    where
        R: Rng + ?Sized,
    {
        let mutation = self.sample(&network.topology(), rng);
        mutation.apply(network)?;
        Ok(mutation)
    }
}

#[cfg(test)]
mod tests {
    use awale_nn::activation;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_samples_stay_in_bounds() {
        let topology = Topology::new(12, 2, 5, 6);
        let mutator = Mutator::new(0.25).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let mutation = mutator.sample(&topology, &mut rng);
            let (width, _) = topology.layer_shape(mutation.layer).unwrap();
            assert!(mutation.neuron < width);
            assert!((-0.25..=0.25).contains(&mutation.delta));
        }
    }

    #[test]
    fn test_mutate_shifts_one_neuron() {
        let mut rng = Pcg32::seed_from_u64(11);
        let topology = Topology::new(3, 1, 2, 2);
        let original = Network::random(topology, 0.1, activation::sigmoid(), &mut rng).unwrap();
        let mut network = original.clone();

        let mutation = Mutator::new(0.5).unwrap().mutate(&mut network, &mut rng).unwrap();

        for (layer, (before, after)) in original.layers().iter().zip(network.layers()).enumerate() {
            for neuron in 0..before.width() {
                let old = before.neuron_weights(neuron).unwrap();
                let new = after.neuron_weights(neuron).unwrap();
                let shift = if (layer, neuron) == (mutation.layer, mutation.neuron) {
                    mutation.delta
                } else {
                    0.0
                };
                for (o, n) in old.iter().zip(new) {
                    assert!((n - o - shift).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_zero_bound_is_a_no_op_delta() {
        let mutator = Mutator::new(0.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(0);
        let mutation = mutator.sample(&Topology::new(1, 1, 1, 1), &mut rng);
        assert!(mutation.delta.abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_invalid_bound() {
        assert!(Mutator::new(-1.0).is_err());
        assert!(Mutator::new(f64::INFINITY).is_err());
    }
}
