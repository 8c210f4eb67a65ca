//! Activation functions applied by every non-input neuron.
//!
//! Functions are stateless and shared between networks through
//! [`SharedActivation`]; a cloned network may switch to another one without
//! touching its weights.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// A pure scalar function and its derivative.
///
/// `derivative` receives the same pre-activation value (the weighted sum) as
/// `apply`.
pub trait ActivationFunction: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, x: f64) -> f64;
    fn derivative(&self, x: f64) -> f64;
}

pub type SharedActivation = Arc<dyn ActivationFunction>;

/// Logistic function, `1 / (1 + e^-x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl ActivationFunction for Sigmoid {
    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn apply(&self, x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }

    fn derivative(&self, x: f64) -> f64 {
        let y = self.apply(x);
        y * (1.0 - y)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tanh;

impl ActivationFunction for Tanh {
    fn name(&self) -> &'static str {
        "tanh"
    }

    fn apply(&self, x: f64) -> f64 {
        x.tanh()
    }

    fn derivative(&self, x: f64) -> f64 {
        1.0 - x.tanh().powi(2)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl ActivationFunction for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn apply(&self, x: f64) -> f64 {
        x
    }

    fn derivative(&self, _x: f64) -> f64 {
        1.0
    }
}

#[must_use]
pub fn sigmoid() -> SharedActivation {
    Arc::new(Sigmoid)
}

#[must_use]
pub fn tanh() -> SharedActivation {
    Arc::new(Tanh)
}

#[must_use]
pub fn identity() -> SharedActivation {
    Arc::new(Identity)
}

/// Serializable choice of activation function, used by configuration.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivationKind {
    #[default]
    #[display("sigmoid")]
    Sigmoid,
    #[display("tanh")]
    Tanh,
    #[display("identity")]
    Identity,
}

impl ActivationKind {
    #[must_use]
    pub fn shared(self) -> SharedActivation {
        match self {
            Self::Sigmoid => sigmoid(),
            Self::Tanh => tanh(),
            Self::Identity => identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_derivative(f: &dyn ActivationFunction, x: f64) -> f64 {
        let h = 1e-6;
        (f.apply(x + h) - f.apply(x - h)) / (2.0 * h)
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        for f in [sigmoid(), tanh(), identity()] {
            for x in [-3.0, -0.5, 0.0, 0.7, 2.5] {
                let expected = numeric_derivative(&*f, x);
                let actual = f.derivative(x);
                assert!(
                    (expected - actual).abs() < 1e-6,
                    "{} at {x}: {actual} vs {expected}",
                    f.name()
                );
            }
        }
    }

    #[test]
    fn test_sigmoid_range() {
        let f = Sigmoid;
        assert!((f.apply(0.0) - 0.5).abs() < f64::EPSILON);
        assert!(f.apply(-800.0) >= 0.0);
        assert!(f.apply(800.0) <= 1.0);
    }

    #[test]
    fn test_kind_matches_function_name() {
        for kind in [ActivationKind::Sigmoid, ActivationKind::Tanh, ActivationKind::Identity] {
            assert_eq!(kind.shared().name(), kind.to_string());
            assert_eq!(kind.to_string().parse::<ActivationKind>().unwrap(), kind);
        }
    }
}
