//! Per-episode memory and return computation.

use physics::{Action, PhysicsState};

use crate::policy::Activations;

/// Five index-aligned sequences recorded over one episode.
///
/// Entries are only appended through [`EpisodeBuffer::push`] and only removed
/// all at once through [`EpisodeBuffer::clear`], so the sequences always have
/// the same length.
#[derive(Clone, Debug, Default)]
pub struct EpisodeBuffer {
    inputs: Vec<[f32; PhysicsState::DIM]>,
    hiddens: Vec<Vec<f32>>,
    probabilities: Vec<[f32; Action::COUNT]>,
    actions: Vec<Action>,
    rewards: Vec<f32>,
}

impl EpisodeBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, activations: Activations, action: Action, reward: f32) {
        let Activations { input, hidden, output } = activations;
        self.inputs.push(input);
        self.hiddens.push(hidden);
        self.probabilities.push(output);
        self.actions.push(action);
        self.rewards.push(reward);
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
        self.hiddens.clear();
        self.probabilities.clear();
        self.actions.clear();
        self.rewards.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    #[must_use]
    pub fn inputs(&self) -> &[[f32; PhysicsState::DIM]] {
        &self.inputs
    }

    #[must_use]
    pub fn hiddens(&self) -> &[Vec<f32>] {
        &self.hiddens
    }

    #[must_use]
    pub fn probabilities(&self) -> &[[f32; Action::COUNT]] {
        &self.probabilities
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn rewards(&self) -> &[f32] {
        &self.rewards
    }

    /// Lengths of the five sequences, in declaration order.
    #[must_use]
    pub fn lengths(&self) -> [usize; 5] {
        [
            self.inputs.len(),
            self.hiddens.len(),
            self.probabilities.len(),
            self.actions.len(),
            self.rewards.len(),
        ]
    }

    #[must_use]
    pub fn total_reward(&self) -> f32 {
        self.rewards.iter().sum()
    }
}

/// `G[t] = r[t] + gamma * G[t + 1]`, accumulated backwards from the last step.
#[must_use]
pub fn discounted_returns(rewards: &[f32], gamma: f32) -> Vec<f32> {
    let mut returns = vec![0.0; rewards.len()];
    let mut running = 0.0;
    for (g, &r) in returns.iter_mut().zip(rewards).rev() {
        running = r + gamma * running;
        *g = running;
    }
    returns
}

/// Population mean and standard deviation; `(0, 0)` for an empty slice.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_std(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
    (mean, var.sqrt())
}

/// Shifts returns to zero mean and scales them to unit population std.
///
/// A standard deviation of exactly zero is replaced with one, so constant
/// returns map to all-zero advantages.
#[must_use]
pub fn normalize_returns(returns: &[f32]) -> Vec<f32> {
    let (mean, std) = mean_std(returns);
    let std = if std == 0.0 { 1.0 } else { std };
    returns.iter().map(|g| (g - mean) / std).collect()
}
