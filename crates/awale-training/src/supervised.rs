//! Supervised bootstrapping from historical games.
//!
//! For every [`Observation`] the network first predicts the confidences of the
//! recorded position. The training target is that same prediction with the
//! played hole replaced by `1.0` when the mover went on to win and `0.0`
//! otherwise, so only the played hole is pulled towards the outcome.
//!
//! Passes over the dataset repeat for the configured number of epochs, or until
//! the wall-clock budget runs out. The budget is checked after each
//! observation; an update is never cut short.

use std::time::Duration;

use awale_engine::{Dataset, NB_HOLES, Observation};
use awale_nn::{Network, NetworkError, VectorKind};
use serde::{Deserialize, Serialize};

use crate::{Deadline, SupervisedParams};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SupervisedError {
    #[display("observation #{index} plays hole {move_number}, expected 1..={NB_HOLES}")]
    #[from(ignore)]
    InvalidMove { index: usize, move_number: u8 },
    #[display("network rejected observation")]
    Network(NetworkError),
}

/// Builds the training target for `observation` from the current prediction.
///
/// `index` only labels the error.
pub fn supervised_target(
    prediction: &[f64],
    observation: &Observation,
    index: usize,
) -> Result<Vec<f64>, SupervisedError> {
    if prediction.len() != NB_HOLES {
        return Err(NetworkError::DimensionMismatch {
            kind: VectorKind::Target,
            expected: NB_HOLES,
            found: prediction.len(),
        }
        .into());
    }
    let Some(hole) = observation.move_index() else {
        return Err(SupervisedError::InvalidMove {
            index,
            move_number: observation.move_number,
        });
    };
    let mut target = prediction.to_vec();
    target[hole] = if observation.won { 1.0 } else { 0.0 };
    Ok(target)
}

/// Outcome of a supervised pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupervisedReport {
    /// Epochs completed over the whole dataset.
    pub epochs: usize,
    /// Observations trained on, over all epochs.
    pub observations: usize,
    /// Mean over the observations of the last (possibly partial) epoch of the
    /// squared error measured before each update.
    pub mean_squared_error: Option<f64>,
    /// Whether the budget ran out before the last epoch completed.
    pub interrupted: bool,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct SupervisedTrainer {
    params: SupervisedParams,
}

impl SupervisedTrainer {
    #[must_use]
    pub fn new(params: SupervisedParams) -> Self {
        Self { params }
    }

    pub fn train(
        &self,
        network: &mut Network,
        dataset: &Dataset,
    ) -> Result<SupervisedReport, SupervisedError> {
        let deadline = Deadline::after(self.params.budget);
        let mut report = SupervisedReport::default();

        'epochs: for epoch in 0..self.params.epochs {
            if dataset.is_empty() {
                break;
            }
            let mut squared_error = 0.0;
            let mut seen = 0_usize;
            for (index, observation) in dataset.iter().enumerate() {
                let features = observation.features();
                let prediction = network.predict(&features)?;
                let target = supervised_target(&prediction, observation, index)?;
                squared_error += target
                    .iter()
                    .zip(&prediction)
                    .map(|(t, p)| (t - p).powi(2))
                    .sum::<f64>();
                network.train(&features, &target)?;
                seen += 1;
                report.observations += 1;
                report.mean_squared_error = Some(squared_error / to_f64(seen));

                if deadline.is_expired() && seen < dataset.len() {
                    report.interrupted = true;
                    log::info!(
                        "supervised budget of {:?} spent during epoch {} after {seen} observations",
                        deadline.budget(),
                        epoch + 1
                    );
                    break 'epochs;
                }
            }
            report.epochs += 1;
            log::info!(
                "supervised epoch {}: mse {:.6} over {seen} observations",
                epoch + 1,
                squared_error / to_f64(seen)
            );
            if deadline.is_expired() {
                report.interrupted = report.epochs < self.params.epochs;
                break;
            }
        }

        report.elapsed = deadline.elapsed();
        Ok(report)
    }
}

#[expect(clippy::cast_precision_loss)]
fn to_f64(count: usize) -> f64 {
    count as f64
}
