//! # Training loop
//!
//! [`run`] trains a fresh [`Session`] for the configured number of episodes,
//! logging progress through `tracing`, and optionally writes the final
//! network parameters as JSON.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::TrainConfig;
use crate::session::Session;

/// Seed offset for the greedy evaluation environment, so it never replays
/// the training environment's initial states.
const EVAL_SEED_OFFSET: u64 = 0x5eed;

/// Run headless training.
///
/// Failed updates (non-finite gradients) are logged and training continues
/// with the next episode.
///
/// # Errors
///
/// Returns configuration errors, or an error writing the parameter dump.
pub fn run(config: &TrainConfig, dump_params: Option<&Path>) -> Result<()> {
    let mut session = Session::new(config)?;

    tracing::info!(
        hidden_width = config.hidden_width,
        learning_rate = config.learning_rate,
        discount = config.discount,
        seed = config.seed,
        "Starting training for {} episodes...",
        config.episodes
    );

    let mut failed_updates = 0usize;
    for _ in 0..config.episodes {
        match session.run_episode() {
            Ok(summary) => {
                if summary.episode % config.log_every == 0 {
                    let m = session.metrics();
                    tracing::info!(
                        "Episode {} score {} best {} avg {:.1}",
                        m.episode(),
                        m.last_score(),
                        m.best_score(),
                        m.running_average()
                    );
                }
            }
            Err(e) => {
                failed_updates += 1;
                tracing::warn!("Update skipped: {e}");
            }
        }
    }

    let m = session.metrics();
    let greedy = session.evaluate(config.seed.wrapping_add(EVAL_SEED_OFFSET));
    tracing::info!(
        episodes = m.episode(),
        best = m.best_score(),
        average = m.running_average(),
        greedy_score = greedy,
        failed_updates,
        "Training finished."
    );

    if let Some(path) = dump_params {
        let json = serde_json::to_string_pretty(&session.parameters())?;
        std::fs::write(path, json)
            .with_context(|| format!("writing parameters to {}", path.display()))?;
        tracing::info!("Wrote network parameters to {}", path.display());
    }

    Ok(())
}
