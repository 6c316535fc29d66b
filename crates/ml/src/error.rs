use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("hidden width must be at least 1, got {0}")]
    InvalidHiddenWidth(usize),
    #[error("learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f32),
    #[error("discount factor must lie in (0, 1], got {0}")]
    InvalidDiscount(f32),
    #[error("non-finite gradient over a {steps}-step episode; update discarded")]
    NonFiniteGradient { steps: usize },
}
