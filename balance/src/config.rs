//! Training configuration: JSON file with per-field defaults.

use anyhow::{ensure, Context, Result};
use ml::AgentConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainConfig {
    pub hidden_width: usize,
    pub learning_rate: f32,
    pub discount: f32,
    pub seed: u64,
    pub episodes: usize,
    /// Episodes are truncated and trained on once they reach this many steps.
    pub max_steps: usize,
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        let agent = AgentConfig::default();
        Self {
            hidden_width: agent.hidden_width,
            learning_rate: agent.learning_rate,
            discount: agent.discount,
            seed: agent.seed,
            episodes: 500,
            max_steps: 500,
            log_every: 20,
        }
    }
}

/// Per-field replacements layered over a loaded [`TrainConfig`], typically
/// from command-line flags. `None` keeps the underlying value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConfigOverrides {
    pub hidden_width: Option<usize>,
    pub learning_rate: Option<f32>,
    pub discount: Option<f32>,
    pub seed: Option<u64>,
    pub episodes: Option<usize>,
    pub max_steps: Option<usize>,
    pub log_every: Option<usize>,
}

impl TrainConfig {
    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Replaces every field that has an override.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        let ConfigOverrides {
            hidden_width,
            learning_rate,
            discount,
            seed,
            episodes,
            max_steps,
            log_every,
        } = *overrides;
        if let Some(v) = hidden_width {
            self.hidden_width = v;
        }
        if let Some(v) = learning_rate {
            self.learning_rate = v;
        }
        if let Some(v) = discount {
            self.discount = v;
        }
        if let Some(v) = seed {
            self.seed = v;
        }
        if let Some(v) = episodes {
            self.episodes = v;
        }
        if let Some(v) = max_steps {
            self.max_steps = v;
        }
        if let Some(v) = log_every {
            self.log_every = v;
        }
    }

    #[must_use]
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            hidden_width: self.hidden_width,
            learning_rate: self.learning_rate,
            discount: self.discount,
            seed: self.seed,
        }
    }

    /// # Errors
    ///
    /// Returns the agent's validation error, or an error for a zero step cap
    /// or logging interval.
    pub fn validate(&self) -> Result<()> {
        self.agent_config().validate()?;
        ensure!(self.max_steps > 0, "max_steps must be at least 1");
        ensure!(self.log_every > 0, "log_every must be at least 1");
        Ok(())
    }
}
