//! Two-layer stochastic policy: `4 → H (tanh) → 2 (softmax)`.

use physics::{Action, PhysicsState};
use serde::{Deserialize, Serialize};

use crate::nn::{self, Dense, DenseGrads, Tensor};
use crate::optim::Sgd;

/// Standard deviation of the initial weights.
pub const INIT_STD: f32 = 0.1;

/// Snapshot of one forward pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activations {
    pub input: [f32; PhysicsState::DIM],
    /// Hidden layer after tanh.
    pub hidden: Vec<f32>,
    /// Action probabilities, summing to 1.
    pub output: [f32; Action::COUNT],
}

impl Activations {
    /// Action with the highest probability; ties go to [`Action::Left`].
    #[must_use]
    pub fn greedy_action(&self) -> Action {
        if self.output[1] > self.output[0] {
            Action::Right
        } else {
            Action::Left
        }
    }
}

/// Copy of the network weights for display or serialization.
///
/// Mutating it has no effect on the agent it was taken from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkParameters {
    /// Shape `[4, H]`.
    pub input_hidden: Tensor,
    /// Shape `[H]`.
    pub hidden_bias: Tensor,
    /// Shape `[H, 2]`.
    pub hidden_output: Tensor,
    /// Shape `[2]`.
    pub output_bias: Tensor,
}

impl NetworkParameters {
    #[must_use]
    pub fn hidden_width(&self) -> usize {
        self.hidden_bias.len()
    }
}

pub struct PolicyNetwork {
    hidden: Dense,
    output: Dense,
}

/// Gradient accumulators for both layers of a [`PolicyNetwork`].
pub struct PolicyGrads {
    pub hidden: DenseGrads,
    pub output: DenseGrads,
}

impl PolicyGrads {
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.hidden.is_finite() && self.output.is_finite()
    }

    #[must_use]
    pub fn norm(&self) -> f32 {
        (self.hidden.sum_sq() + self.output.sum_sq()).sqrt()
    }
}

impl PolicyNetwork {
    /// Gaussian-initialized weights (std [`INIT_STD`]) and zero biases.
    pub fn new(hidden_width: usize, rng: &mut fastrand::Rng) -> Self {
        Self {
            hidden: Dense::gaussian(PhysicsState::DIM, hidden_width, INIT_STD, rng),
            output: Dense::gaussian(hidden_width, Action::COUNT, INIT_STD, rng),
        }
    }

    #[must_use]
    pub fn hidden_width(&self) -> usize {
        self.hidden.out_dim()
    }

    #[must_use]
    pub fn forward(&self, state: &PhysicsState) -> Activations {
        let input = state.to_array();
        let hidden = nn::tanh(&self.hidden.forward(&input));
        let probs = nn::softmax(&self.output.forward(&hidden));
        Activations { input, hidden, output: [probs[0], probs[1]] }
    }

    #[must_use]
    pub fn parameters(&self) -> NetworkParameters {
        NetworkParameters {
            input_hidden: self.hidden.w.clone(),
            hidden_bias: self.hidden.b.clone(),
            hidden_output: self.output.w.clone(),
            output_bias: self.output.b.clone(),
        }
    }

    #[must_use]
    pub fn zero_grads(&self) -> PolicyGrads {
        PolicyGrads {
            hidden: self.hidden.zero_grads(),
            output: self.output.zero_grads(),
        }
    }

    /// Backpropagates an error on the output logits for one time step.
    pub fn backward(
        &self,
        input: &[f32],
        hidden: &[f32],
        logit_grad: &[f32],
        grads: &mut PolicyGrads,
    ) {
        let hidden_grad = self.output.backward(hidden, logit_grad, &mut grads.output);
        let pre_tanh_grad = nn::tanh_backward(hidden, &hidden_grad);
        self.hidden.backward(input, &pre_tanh_grad, &mut grads.hidden);
    }

    pub fn apply(&mut self, sgd: &Sgd, grads: &PolicyGrads) {
        sgd.step(&mut [
            (&mut self.hidden.w, &grads.hidden.w),
            (&mut self.hidden.b, &grads.hidden.b),
            (&mut self.output.w, &grads.output.w),
            (&mut self.output.b, &grads.output.b),
        ]);
    }
}
