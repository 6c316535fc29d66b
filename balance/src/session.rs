//! One environment/agent pair and the loop that drives it.

use ml::{AgentError, NetworkParameters, ReinforceAgent, TrainOutcome, TrainReport};
use physics::{CartPole, PhysicsState};

use crate::config::TrainConfig;
use crate::metrics::TrainingMetrics;

/// What happened in a finished episode.
#[derive(Clone, Debug)]
pub struct EpisodeSummary {
    /// 1-based index of the episode within this session.
    pub episode: usize,
    pub score: usize,
    /// The step cap ended the episode rather than the physics.
    pub truncated: bool,
    pub report: Option<TrainReport>,
}

/// Owns one [`CartPole`] and one [`ReinforceAgent`] and steps them together.
///
/// The hidden width of the agent is fixed for the lifetime of the pair;
/// [`Session::rebuild`] replaces both rather than resizing anything.
pub struct Session {
    env: CartPole,
    agent: ReinforceAgent,
    state: PhysicsState,
    metrics: TrainingMetrics,
    max_steps: usize,
    seed: u64,
}

impl Session {
    /// # Errors
    ///
    /// Rejects any configuration [`TrainConfig::validate`] rejects.
    pub fn new(config: &TrainConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let agent = ReinforceAgent::new(&config.agent_config())?;
        let mut env = CartPole::new(config.seed);
        let state = env.reset();
        Ok(Self {
            env,
            agent,
            state,
            metrics: TrainingMetrics::new(),
            max_steps: config.max_steps,
            seed: config.seed,
        })
    }

    #[must_use]
    pub fn agent(&self) -> &ReinforceAgent {
        &self.agent
    }

    #[must_use]
    pub fn env(&self) -> &CartPole {
        &self.env
    }

    #[must_use]
    pub fn metrics(&self) -> &TrainingMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn parameters(&self) -> NetworkParameters {
        self.agent.parameters()
    }

    /// # Errors
    ///
    /// See [`ReinforceAgent::set_learning_rate`].
    pub fn set_learning_rate(&mut self, lr: f32) -> Result<(), AgentError> {
        self.agent.set_learning_rate(lr)
    }

    /// # Errors
    ///
    /// See [`ReinforceAgent::set_discount`].
    pub fn set_discount(&mut self, gamma: f32) -> Result<(), AgentError> {
        self.agent.set_discount(gamma)
    }

    /// Replaces the agent and environment with fresh ones of a new hidden
    /// width. Learning rate, discount and seed carry over; metrics restart.
    ///
    /// # Errors
    ///
    /// Rejects a zero width and leaves the current pair in place.
    pub fn rebuild(&mut self, hidden_width: usize) -> Result<(), AgentError> {
        let config = ml::AgentConfig {
            hidden_width,
            learning_rate: self.agent.learning_rate(),
            discount: self.agent.discount(),
            seed: self.seed,
        };
        let agent = ReinforceAgent::new(&config)?;
        let mut env = CartPole::new(self.seed);
        self.state = env.reset();
        self.env = env;
        self.agent = agent;
        self.metrics = TrainingMetrics::new();
        tracing::info!(hidden_width, "rebuilt agent and environment");
        Ok(())
    }

    /// Runs at most `budget` environment steps of the current episode.
    ///
    /// Returns the summary if an episode ended (and was trained on) within
    /// the budget, so callers can yield between batches.
    ///
    /// # Errors
    ///
    /// Propagates [`AgentError::NonFiniteGradient`] from the end-of-episode
    /// update. The environment is reset either way.
    pub fn advance(&mut self, budget: usize) -> Result<Option<EpisodeSummary>, AgentError> {
        for _ in 0..budget {
            let pred = self.agent.predict(&self.state);
            let step = self.env.step(pred.action);
            self.agent.store_step(pred.activations, pred.action, step.reward);
            self.state = step.state;

            let truncated = !step.done && self.agent.episode_len() >= self.max_steps;
            if step.done || truncated {
                return self.finish_episode(truncated).map(Some);
            }
        }
        Ok(None)
    }

    /// Runs the current episode to completion and trains on it.
    ///
    /// # Errors
    ///
    /// See [`Session::advance`].
    pub fn run_episode(&mut self) -> Result<EpisodeSummary, AgentError> {
        loop {
            if let Some(summary) = self.advance(self.max_steps)? {
                return Ok(summary);
            }
        }
    }

    /// Scores the current policy with greedy actions on a separate
    /// environment, leaving training state untouched.
    #[must_use]
    pub fn evaluate(&self, seed: u64) -> usize {
        let mut env = CartPole::new(seed);
        let mut state = env.state();
        let mut steps = 0;
        while steps < self.max_steps {
            let action = self.agent.policy(&state).greedy_action();
            let step = env.step(action);
            state = step.state;
            steps += 1;
            if step.done {
                break;
            }
        }
        steps
    }

    fn finish_episode(&mut self, truncated: bool) -> Result<EpisodeSummary, AgentError> {
        let score = self.agent.episode_len();
        let trained = self.agent.train();
        self.state = self.env.reset();
        self.metrics.record(score);

        let report = match trained? {
            TrainOutcome::Updated(report) => Some(report),
            TrainOutcome::Skipped => None,
        };
        let summary = EpisodeSummary {
            episode: self.metrics.episode(),
            score,
            truncated,
            report,
        };
        tracing::debug!(
            episode = summary.episode,
            score,
            truncated,
            "episode finished"
        );
        Ok(summary)
    }
}
