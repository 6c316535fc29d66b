//! REINFORCE agent: action sampling, trajectory recording and the
//! once-per-episode policy-gradient update.

use physics::{Action, PhysicsState};

use crate::error::AgentError;
use crate::optim::Sgd;
use crate::policy::{Activations, NetworkParameters, PolicyNetwork};
use crate::trajectory::{self, EpisodeBuffer};

/// Construction parameters for a [`ReinforceAgent`].
#[derive(Clone, Debug, PartialEq)]
pub struct AgentConfig {
    pub hidden_width: usize,
    pub learning_rate: f32,
    pub discount: f32,
    /// Seed for weight initialization and action sampling.
    pub seed: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            hidden_width: 16,
            learning_rate: 0.01,
            discount: 0.99,
            seed: 0,
        }
    }
}

impl AgentConfig {
    /// # Errors
    ///
    /// Returns the first offending field as an [`AgentError`].
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.hidden_width == 0 {
            return Err(AgentError::InvalidHiddenWidth(self.hidden_width));
        }
        check_learning_rate(self.learning_rate)?;
        check_discount(self.discount)
    }
}

fn check_learning_rate(lr: f32) -> Result<(), AgentError> {
    if lr.is_finite() && lr > 0.0 {
        Ok(())
    } else {
        Err(AgentError::InvalidLearningRate(lr))
    }
}

fn check_discount(gamma: f32) -> Result<(), AgentError> {
    if gamma > 0.0 && gamma <= 1.0 {
        Ok(())
    } else {
        Err(AgentError::InvalidDiscount(gamma))
    }
}

/// An action sampled from the policy together with the forward pass that produced it.
#[derive(Clone, Debug)]
pub struct Prediction {
    pub action: Action,
    pub activations: Activations,
}

/// Summary of one applied update.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainReport {
    pub steps: usize,
    pub total_reward: f32,
    /// Mean of the raw discounted returns before normalization.
    pub return_mean: f32,
    pub return_std: f32,
    /// L2 norm of the summed gradient over all parameters.
    pub grad_norm: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrainOutcome {
    /// The buffer was empty; nothing changed.
    Skipped,
    Updated(TrainReport),
}

pub struct ReinforceAgent {
    network: PolicyNetwork,
    buffer: EpisodeBuffer,
    sgd: Sgd,
    discount: f32,
    rng: fastrand::Rng,
}

impl ReinforceAgent {
    /// # Errors
    ///
    /// Rejects a zero hidden width, a non-positive or non-finite learning
    /// rate, and a discount outside `(0, 1]`.
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        config.validate()?;
        let mut rng = fastrand::Rng::with_seed(config.seed);
        let network = PolicyNetwork::new(config.hidden_width, &mut rng);
        Ok(Self {
            network,
            buffer: EpisodeBuffer::new(),
            sgd: Sgd::new(config.learning_rate),
            discount: config.discount,
            rng,
        })
    }

    #[must_use]
    pub fn hidden_width(&self) -> usize {
        self.network.hidden_width()
    }

    #[must_use]
    pub fn learning_rate(&self) -> f32 {
        self.sgd.lr
    }

    #[must_use]
    pub fn discount(&self) -> f32 {
        self.discount
    }

    /// # Errors
    ///
    /// Returns [`AgentError::InvalidLearningRate`] and keeps the old value.
    pub fn set_learning_rate(&mut self, lr: f32) -> Result<(), AgentError> {
        check_learning_rate(lr)?;
        self.sgd.lr = lr;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AgentError::InvalidDiscount`] and keeps the old value.
    pub fn set_discount(&mut self, gamma: f32) -> Result<(), AgentError> {
        check_discount(gamma)?;
        self.discount = gamma;
        Ok(())
    }

    /// Runs the policy on `state` and samples an action from its output.
    pub fn predict(&mut self, state: &PhysicsState) -> Prediction {
        let activations = self.network.forward(state);
        let action = if self.rng.f32() < activations.output[0] {
            Action::Left
        } else {
            Action::Right
        };
        Prediction { action, activations }
    }

    /// Forward pass without sampling.
    #[must_use]
    pub fn policy(&self, state: &PhysicsState) -> Activations {
        self.network.forward(state)
    }

    pub fn store_step(&mut self, activations: Activations, action: Action, reward: f32) {
        self.buffer.push(activations, action, reward);
    }

    #[must_use]
    pub fn episode_len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn buffer(&self) -> &EpisodeBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn parameters(&self) -> NetworkParameters {
        self.network.parameters()
    }

    /// One full-batch REINFORCE step over the buffered episode, then clears it.
    ///
    /// Each step's logit error is `(p - onehot(a)) * advantage`, where the
    /// advantage is the normalized discounted return. Gradients are summed
    /// over the episode and applied once with plain SGD.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NonFiniteGradient`] if the summed gradient holds a
    /// NaN or infinity. The parameters are left as they were and the buffer is
    /// still cleared.
    pub fn train(&mut self) -> Result<TrainOutcome, AgentError> {
        if self.buffer.is_empty() {
            tracing::trace!("train called on an empty episode");
            return Ok(TrainOutcome::Skipped);
        }

        let steps = self.buffer.len();
        let returns = trajectory::discounted_returns(self.buffer.rewards(), self.discount);
        let (return_mean, return_std) = trajectory::mean_std(&returns);
        let advantages = trajectory::normalize_returns(&returns);

        let mut grads = self.network.zero_grads();
        for (t, &advantage) in advantages.iter().enumerate() {
            let probs = &self.buffer.probabilities()[t];
            let taken = self.buffer.actions()[t].index();
            let mut logit_grad = [0.0; Action::COUNT];
            for (k, g) in logit_grad.iter_mut().enumerate() {
                let target = if k == taken { 1.0 } else { 0.0 };
                *g = (probs[k] - target) * advantage;
            }
            self.network.backward(
                &self.buffer.inputs()[t],
                &self.buffer.hiddens()[t],
                &logit_grad,
                &mut grads,
            );
        }

        let total_reward = self.buffer.total_reward();
        self.buffer.clear();

        if !grads.is_finite() {
            tracing::warn!(steps, "discarding update with non-finite gradient");
            return Err(AgentError::NonFiniteGradient { steps });
        }

        self.network.apply(&self.sgd, &grads);
        let report = TrainReport {
            steps,
            total_reward,
            return_mean,
            return_std,
            grad_norm: grads.norm(),
        };
        tracing::debug!(
            steps,
            return_mean,
            return_std,
            grad_norm = report.grad_norm,
            "policy updated"
        );
        Ok(TrainOutcome::Updated(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_of_one_is_accepted() {
        let config = AgentConfig { discount: 1.0, ..AgentConfig::default() };
        assert!(ReinforceAgent::new(&config).is_ok());
    }

    #[test]
    fn nan_discount_is_rejected() {
        let config = AgentConfig { discount: f32::NAN, ..AgentConfig::default() };
        assert!(matches!(
            ReinforceAgent::new(&config),
            Err(AgentError::InvalidDiscount(_))
        ));
    }
}
