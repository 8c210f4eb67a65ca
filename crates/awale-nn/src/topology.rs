use serde::{Deserialize, Serialize};

use crate::NetworkError;

/// Shape of a network: input width, hidden layer count and width, output width.
///
/// Weighted layers are indexed `0..hidden_layers` for the hidden layers and
/// `hidden_layers` for the output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topology {
    pub inputs: usize,
    pub hidden_layers: usize,
    pub hidden_width: usize,
    pub outputs: usize,
}

impl Topology {
    #[must_use]
    pub const fn new(inputs: usize, hidden_layers: usize, hidden_width: usize, outputs: usize) -> Self {
        Self {
            inputs,
            hidden_layers,
            hidden_width,
            outputs,
        }
    }

    pub fn validate(&self) -> Result<(), NetworkError> {
        let reason = if self.inputs == 0 {
            "input width is zero"
        } else if self.hidden_layers == 0 {
            "no hidden layer"
        } else if self.hidden_width == 0 {
            "hidden width is zero"
        } else if self.outputs == 0 {
            "output width is zero"
        } else {
            return Ok(());
        };
        Err(NetworkError::InvalidTopology { reason })
    }

    /// Number of weighted layers (hidden layers plus the output layer).
    #[must_use]
    pub const fn layer_count(&self) -> usize {
        self.hidden_layers + 1
    }

    /// `(width, fan_in)` of a weighted layer.
    #[must_use]
    pub const fn layer_shape(&self, layer: usize) -> Option<(usize, usize)> {
        if layer > self.hidden_layers {
            return None;
        }
        let width = if layer == self.hidden_layers {
            self.outputs
        } else {
            self.hidden_width
        };
        let fan_in = if layer == 0 {
            self.inputs
        } else {
            self.hidden_width
        };
        Some((width, fan_in))
    }

    /// Total number of weights.
    #[must_use]
    pub fn weight_count(&self) -> usize {
        (0..self.layer_count())
            .filter_map(|layer| self.layer_shape(layer))
            .map(|(width, fan_in)| width * fan_in)
            .sum()
    }
}
