use std::collections::VecDeque;

/// Number of recent episodes in the running average.
pub const AVERAGE_WINDOW: usize = 100;

/// Score statistics across training episodes. A score is the number of
/// steps an episode lasted.
#[derive(Clone, Debug, Default)]
pub struct TrainingMetrics {
    episodes: usize,
    last_score: usize,
    best_score: usize,
    recent: VecDeque<usize>,
    recent_sum: usize,
}

impl TrainingMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, score: usize) {
        self.episodes += 1;
        self.last_score = score;
        self.best_score = self.best_score.max(score);
        self.recent.push_back(score);
        self.recent_sum += score;
        if self.recent.len() > AVERAGE_WINDOW {
            if let Some(old) = self.recent.pop_front() {
                self.recent_sum -= old;
            }
        }
    }

    /// Number of completed episodes.
    #[must_use]
    pub fn episode(&self) -> usize {
        self.episodes
    }

    #[must_use]
    pub fn last_score(&self) -> usize {
        self.last_score
    }

    #[must_use]
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// Mean score over the last [`AVERAGE_WINDOW`] episodes; zero before the first.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn running_average(&self) -> f32 {
        if self.recent.is_empty() {
            0.0
        } else {
            self.recent_sum as f32 / self.recent.len() as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tracks_best_and_last() {
        let mut m = TrainingMetrics::new();
        assert_eq!(m.running_average(), 0.0);
        for s in [10, 30, 20] {
            m.record(s);
        }
        assert_eq!(m.episode(), 3);
        assert_eq!(m.last_score(), 20);
        assert_eq!(m.best_score(), 30);
        assert_relative_eq!(m.running_average(), 20.0);
    }

    #[test]
    fn running_average_forgets_old_episodes() {
        let mut m = TrainingMetrics::new();
        for _ in 0..AVERAGE_WINDOW {
            m.record(10);
        }
        for _ in 0..AVERAGE_WINDOW {
            m.record(50);
        }
        assert_relative_eq!(m.running_average(), 50.0);
        assert_eq!(m.best_score(), 50);
        assert_eq!(m.episode(), 2 * AVERAGE_WINDOW);
    }
}
