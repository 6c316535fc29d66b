use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("action {0} is outside the action space {{0, 1}}")]
    InvalidAction(usize),
}
