use rand::Rng;

use crate::{
    NetworkError, Topology, VectorKind,
    activation::{ActivationFunction, SharedActivation},
};

/// Learning rate used when none is configured.
pub const DEFAULT_LEARNING_RATE: f64 = 0.05;

/// A weighted layer: one row of incoming weights per neuron.
///
/// Besides the weights, a layer caches the weighted sums and activations of
/// the last forward pass and the deltas of the last backward pass. The caches
/// are only meaningful between a forward pass and the following backward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    width: usize,
    fan_in: usize,
    weights: Vec<f64>,
    sums: Vec<f64>,
    activations: Vec<f64>,
    errors: Vec<f64>,
}

impl Layer {
    fn from_weights(width: usize, fan_in: usize, weights: Vec<f64>) -> Self {
        debug_assert_eq!(weights.len(), width * fan_in);
        Self {
            width,
            fan_in,
            weights,
            sums: vec![0.0; width],
            activations: vec![0.0; width],
            errors: vec![0.0; width],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Width of the upstream layer.
    #[must_use]
    pub fn fan_in(&self) -> usize {
        self.fan_in
    }

    /// All weights, row-major by neuron.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn neuron_weights(&self, neuron: usize) -> Option<&[f64]> {
        self.weights.chunks_exact(self.fan_in).nth(neuron)
    }

    #[must_use]
    pub fn activations(&self) -> &[f64] {
        &self.activations
    }

    /// Deltas of the last backward pass.
    #[must_use]
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    fn neuron_weights_mut(&mut self, neuron: usize) -> Option<&mut [f64]> {
        self.weights.chunks_exact_mut(self.fan_in).nth(neuron)
    }

    fn forward(&mut self, upstream: &[f64], f: &dyn ActivationFunction) {
        for (neuron, weights) in self.weights.chunks_exact(self.fan_in).enumerate() {
            let sum = weights.iter().zip(upstream).map(|(w, a)| w * a).sum::<f64>();
            self.sums[neuron] = sum;
            self.activations[neuron] = f.apply(sum);
        }
    }

    /// Computes this layer's deltas from the downstream layer's deltas and
    /// its current weights.
    fn backpropagate_from(&mut self, downstream: &Layer, f: &dyn ActivationFunction) {
        for k in 0..self.width {
            let propagated = downstream
                .weights
                .chunks_exact(downstream.fan_in)
                .zip(&downstream.errors)
                .map(|(weights, error)| weights[k] * error)
                .sum::<f64>();
            self.errors[k] = f.derivative(self.sums[k]) * propagated;
        }
    }

    fn update_weights(&mut self, upstream: &[f64], learning_rate: f64) {
        for (weights, delta) in self.weights.chunks_exact_mut(self.fan_in).zip(&self.errors) {
            for (weight, activation) in weights.iter_mut().zip(upstream) {
                *weight += learning_rate * delta * activation;
            }
        }
    }
}

/// A fully-connected feed-forward network.
///
/// `predict` and `train` update the activation and error caches in place, so
/// both take `&mut self`; a network must not be shared between concurrent
/// games. Cloning copies every weight: the clone and the source never share
/// mutable state.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    learning_rate: f64,
    activation: SharedActivation,
    inputs: Vec<f64>,
    layers: Vec<Layer>,
}

fn validate_learning_rate(learning_rate: f64) -> Result<(), NetworkError> {
    if learning_rate.is_finite() && learning_rate > 0.0 {
        Ok(())
    } else {
        Err(NetworkError::InvalidLearningRate(learning_rate))
    }
}

fn check_len(kind: VectorKind, expected: usize, found: usize) -> Result<(), NetworkError> {
    if expected == found {
        Ok(())
    } else {
        Err(NetworkError::DimensionMismatch {
            kind,
            expected,
            found,
        })
    }
}

impl Network {
    /// Creates a network with weights drawn uniformly from
    /// `[-1/sqrt(fan_in), 1/sqrt(fan_in)]` for each layer.
    pub fn random<R>(
        topology: Topology,
        learning_rate: f64,
        activation: SharedActivation,
        rng: &mut R,
    ) -> Result<Self, NetworkError>
    where
        R: Rng + ?Sized,
    {
        topology.validate()?;
        let weights = (0..topology.layer_count())
            .filter_map(|layer| topology.layer_shape(layer))
            .map(|(width, fan_in)| {
                #[expect(clippy::cast_precision_loss)]
                let bound = 1.0 / (fan_in as f64).sqrt();
                (0..width * fan_in)
                    .map(|_| rng.random_range(-bound..=bound))
                    .collect()
            })
            .collect();
        Self::from_weights(topology, learning_rate, activation, weights)
    }

    /// Creates a network from explicit weights, one row-major matrix per
    /// weighted layer.
    pub fn from_weights(
        topology: Topology,
        learning_rate: f64,
        activation: SharedActivation,
        weights: Vec<Vec<f64>>,
    ) -> Result<Self, NetworkError> {
        topology.validate()?;
        validate_learning_rate(learning_rate)?;
        check_len(VectorKind::Weights, topology.layer_count(), weights.len())?;

        let mut layers = Vec::with_capacity(weights.len());
        for (index, weights) in weights.into_iter().enumerate() {
            let Some((width, fan_in)) = topology.layer_shape(index) else {
                unreachable!("layer count was checked");
            };
            check_len(VectorKind::Weights, width * fan_in, weights.len())?;
            layers.push(Layer::from_weights(width, fan_in, weights));
        }

        Ok(Self {
            topology,
            learning_rate,
            activation,
            inputs: vec![0.0; topology.inputs],
            layers,
        })
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[must_use]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    #[must_use]
    pub fn activation(&self) -> &dyn ActivationFunction {
        &*self.activation
    }

    /// Weighted layers: hidden layers first, output layer last.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    #[must_use]
    pub fn weight(&self, layer: usize, neuron: usize, input: usize) -> Option<f64> {
        self.layer(layer)?.neuron_weights(neuron)?.get(input).copied()
    }

    /// Runs a forward pass and returns the output activations.
    pub fn predict(&mut self, features: &[f64]) -> Result<Vec<f64>, NetworkError> {
        check_len(VectorKind::Features, self.topology.inputs, features.len())?;
        self.inputs.copy_from_slice(features);

        let activation = &*self.activation;
        let mut upstream: &[f64] = &self.inputs;
        for layer in &mut self.layers {
            layer.forward(upstream, activation);
            let layer: &Layer = layer;
            upstream = &layer.activations;
        }
        Ok(upstream.to_vec())
    }

    /// Runs one backpropagation step towards `target`.
    ///
    /// Layers are processed from the output back to the first hidden layer. A
    /// layer's weights are updated only after its deltas were propagated to the
    /// upstream layer, so every delta is computed from pre-update weights.
    pub fn train(&mut self, features: &[f64], target: &[f64]) -> Result<(), NetworkError> {
        check_len(VectorKind::Target, self.topology.outputs, target.len())?;
        let prediction = self.predict(features)?;

        let activation = &*self.activation;
        let learning_rate = self.learning_rate;
        let Some(output) = self.layers.last_mut() else {
            unreachable!("a network has an output layer");
        };
        for (i, (target, prediction)) in target.iter().zip(&prediction).enumerate() {
            output.errors[i] = activation.derivative(output.sums[i]) * (target - prediction);
        }

        for index in (0..self.layers.len()).rev() {
            let (upstream_layers, rest) = self.layers.split_at_mut(index);
            let layer = &mut rest[0];
            if let Some(previous) = upstream_layers.last_mut() {
                previous.backpropagate_from(layer, activation);
            }
            let upstream = upstream_layers
                .last()
                .map_or(self.inputs.as_slice(), |previous| previous.activations.as_slice());
            layer.update_weights(upstream, learning_rate);
        }
        Ok(())
    }

    /// Sum of squared differences between `target` and the current prediction.
    pub fn squared_error(&mut self, features: &[f64], target: &[f64]) -> Result<f64, NetworkError> {
        check_len(VectorKind::Target, self.topology.outputs, target.len())?;
        let prediction = self.predict(features)?;
        Ok(target
            .iter()
            .zip(&prediction)
            .map(|(t, p)| (t - p).powi(2))
            .sum())
    }

    /// Deep copy that uses `activation` from now on.
    #[must_use]
    pub fn clone_with(&self, activation: SharedActivation) -> Self {
        Self {
            activation,
            ..self.clone()
        }
    }

    /// Adds `delta` to every incoming weight of one neuron.
    ///
    /// `layer` counts weighted layers: `0..hidden_layers` are hidden layers and
    /// `hidden_layers` is the output layer.
    pub fn mutate(&mut self, layer: usize, neuron: usize, delta: f64) -> Result<(), NetworkError> {
        let weights = self
            .layers
            .get_mut(layer)
            .and_then(|l| l.neuron_weights_mut(neuron))
            .ok_or(NetworkError::IndexOutOfRange { layer, neuron })?;
        for weight in weights {
            *weight += delta;
        }
        Ok(())
    }

    /// Builds a child taking whole layers from its parents.
    ///
    /// Even-indexed hidden layers come from `father`, odd-indexed hidden layers
    /// from `mother`; the output layer and the activation function come from
    /// `father`. Weights are copied verbatim, never blended.
    pub fn crossover(father: &Self, mother: &Self) -> Result<Self, NetworkError> {
        if father.topology != mother.topology {
            return Err(NetworkError::TopologyMismatch);
        }
        let mut child = father.clone();
        let hidden = child.topology.hidden_layers;
        for (index, layer) in child.layers.iter_mut().enumerate().take(hidden) {
            if index % 2 == 1 {
                layer.weights.clone_from(&mother.layers[index].weights);
            }
        }
        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use crate::activation;

    use super::*;

    fn network(topology: Topology, seed: u64) -> Network {
        let mut rng = Pcg32::seed_from_u64(seed);
        Network::random(topology, DEFAULT_LEARNING_RATE, activation::sigmoid(), &mut rng).unwrap()
    }

    fn all_weights(network: &Network) -> Vec<f64> {
        network
            .layers()
            .iter()
            .flat_map(|layer| layer.weights().iter().copied())
            .collect()
    }

    #[test]
    fn test_shapes_follow_topology() {
        let topology = Topology::new(12, 5, 20, 6);
        let network = network(topology, 1);
        assert_eq!(network.layers().len(), 6);
        for (index, layer) in network.layers().iter().enumerate() {
            let (width, fan_in) = topology.layer_shape(index).unwrap();
            assert_eq!(layer.width(), width);
            assert_eq!(layer.fan_in(), fan_in);
            assert_eq!(layer.weights().len(), width * fan_in);
        }
    }

    #[test]
    fn test_invalid_construction_is_rejected() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert!(matches!(
            Network::random(Topology::new(12, 0, 20, 6), 0.05, activation::sigmoid(), &mut rng),
            Err(NetworkError::InvalidTopology { .. })
        ));
        assert!(matches!(
            Network::random(Topology::new(12, 2, 20, 6), -1.0, activation::sigmoid(), &mut rng),
            Err(NetworkError::InvalidLearningRate(_))
        ));
        assert!(matches!(
            Network::from_weights(
                Topology::new(1, 1, 1, 1),
                0.05,
                activation::identity(),
                vec![vec![1.0], vec![1.0, 2.0]]
            ),
            Err(NetworkError::DimensionMismatch {
                kind: VectorKind::Weights,
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_predict_by_hand() {
        // 2 inputs -> 2 hidden -> 1 output, identity activation
        let mut network = Network::from_weights(
            Topology::new(2, 1, 2, 1),
            0.1,
            activation::identity(),
            vec![vec![1.0, 2.0, -1.0, 0.5], vec![3.0, -2.0]],
        )
        .unwrap();
        // hidden = [1*1 + 2*2, -1*1 + 0.5*2] = [5, 0]; output = 3*5 - 2*0
        assert_eq!(network.predict(&[1.0, 2.0]).unwrap(), vec![15.0]);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let mut network = network(Topology::new(12, 3, 8, 6), 2);
        let features = [4.0, 4.0, 0.0, 5.0, 5.0, 5.0, 5.0, 4.0, 4.0, 4.0, 4.0, 4.0];
        let weights = all_weights(&network);
        let first = network.predict(&features).unwrap();
        let second = network.predict(&features).unwrap();
        assert_eq!(first, second);
        assert_eq!(all_weights(&network), weights);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut network = network(Topology::new(12, 2, 4, 6), 3);
        assert_eq!(
            network.predict(&[0.0; 11]),
            Err(NetworkError::DimensionMismatch {
                kind: VectorKind::Features,
                expected: 12,
                found: 11
            })
        );
        let weights = all_weights(&network);
        assert_eq!(
            network.train(&[0.0; 12], &[0.0; 7]),
            Err(NetworkError::DimensionMismatch {
                kind: VectorKind::Target,
                expected: 6,
                found: 7
            })
        );
        assert_eq!(all_weights(&network), weights);
    }

    #[test]
    fn test_backpropagation_by_hand() {
        // 1 -> 1 -> 1 with identity activation: a single chain
        let mut network = Network::from_weights(
            Topology::new(1, 1, 1, 1),
            0.1,
            activation::identity(),
            vec![vec![2.0], vec![3.0]],
        )
        .unwrap();
        network.train(&[1.0], &[10.0]).unwrap();
        // prediction 6, output delta 4; hidden delta uses the old weight: 3 * 4
        assert!((network.weight(1, 0, 0).unwrap() - (3.0 + 0.1 * 4.0 * 2.0)).abs() < 1e-12);
        assert!((network.weight(0, 0, 0).unwrap() - (2.0 + 0.1 * 12.0 * 1.0)).abs() < 1e-12);
        assert!((network.layer(0).unwrap().errors()[0] - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_training_reduces_squared_error() {
        let mut network = network(Topology::new(4, 2, 6, 3), 4);
        let features = [0.2, 0.9, 0.1, 0.5];
        let target = [1.0, 0.0, 0.5];
        let initial = network.squared_error(&features, &target).unwrap();
        let mut previous = initial;
        for _ in 0..50 {
            for _ in 0..20 {
                network.train(&features, &target).unwrap();
            }
            let current = network.squared_error(&features, &target).unwrap();
            assert!(current <= previous + 1e-12, "{current} > {previous}");
            previous = current;
        }
        assert!(previous < initial * 0.5, "{previous} vs {initial}");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = network(Topology::new(12, 3, 5, 6), 5);
        let weights = all_weights(&original);
        let mut copy = original.clone_with(activation::tanh());
        assert_eq!(all_weights(&copy), weights);
        assert_eq!(copy.activation().name(), "tanh");
        assert_eq!(original.activation().name(), "sigmoid");

        copy.mutate(1, 2, 0.5).unwrap();
        copy.train(&[1.0; 12], &[0.0; 6]).unwrap();
        assert_eq!(all_weights(&original), weights);
        assert_ne!(all_weights(&copy), weights);
    }

    #[test]
    fn test_mutate_targets_one_neuron() {
        let mut network = network(Topology::new(3, 2, 4, 2), 6);
        let before = network.clone();
        network.mutate(1, 3, 0.001).unwrap();
        for (index, (after, before)) in network.layers().iter().zip(before.layers()).enumerate() {
            for neuron in 0..after.width() {
                let a = after.neuron_weights(neuron).unwrap();
                let b = before.neuron_weights(neuron).unwrap();
                for (a, b) in a.iter().zip(b) {
                    if index == 1 && neuron == 3 {
                        assert!((a - b - 0.001).abs() < 1e-12);
                    } else {
                        assert_eq!(a, b);
                    }
                }
            }
        }
        // output layer is addressable, past it is not
        assert!(network.mutate(2, 1, 0.1).is_ok());
        assert_eq!(
            network.mutate(3, 0, 0.1),
            Err(NetworkError::IndexOutOfRange { layer: 3, neuron: 0 })
        );
        assert_eq!(
            network.mutate(0, 4, 0.1),
            Err(NetworkError::IndexOutOfRange { layer: 0, neuron: 4 })
        );
    }

    #[test]
    fn test_crossover_takes_whole_layers() {
        let topology = Topology::new(12, 5, 7, 6);
        let father = network(topology, 7);
        let mother = network(topology, 8);
        let child = Network::crossover(&father, &mother).unwrap();
        for index in 0..topology.hidden_layers {
            let expected = if index % 2 == 0 { &father } else { &mother };
            assert_eq!(
                child.layer(index).unwrap().weights(),
                expected.layer(index).unwrap().weights(),
                "hidden layer {index}"
            );
        }
        assert_eq!(
            child.layer(topology.hidden_layers).unwrap().weights(),
            father.layer(topology.hidden_layers).unwrap().weights()
        );
    }

    #[test]
    fn test_crossover_requires_same_topology() {
        let father = network(Topology::new(12, 2, 7, 6), 9);
        let mother = network(Topology::new(12, 3, 7, 6), 10);
        assert!(matches!(
            Network::crossover(&father, &mother),
            Err(NetworkError::TopologyMismatch)
        ));
    }
}
