#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Policy-gradient agent
//!
//! The learning half of the balancing workspace. A small feed-forward policy
//! (`4 → H → 2`, tanh hidden layer, softmax output) is trained online with
//! REINFORCE: the agent samples actions during an episode, records each step,
//! and at episode end performs a single full-batch gradient step weighted by
//! the normalized discounted returns.
//!
//! ## Modules
//!
//! -   [`nn`]: tensors, the [`Dense`] layer, tanh and softmax.
//! -   [`optim`]: plain [`Sgd`].
//! -   [`policy`]: the [`PolicyNetwork`] and the data it exposes.
//! -   [`trajectory`]: the [`EpisodeBuffer`] and return computation.
//! -   [`agent`]: [`ReinforceAgent`], which ties the pieces together.

pub mod agent;
pub mod error;
pub mod nn;
pub mod optim;
pub mod policy;
pub mod trajectory;

pub use agent::{AgentConfig, Prediction, ReinforceAgent, TrainOutcome, TrainReport};
pub use error::AgentError;
pub use nn::{Dense, DenseGrads, Tensor};
pub use optim::Sgd;
pub use policy::{Activations, NetworkParameters, PolicyGrads, PolicyNetwork};
pub use trajectory::{discounted_returns, normalize_returns, EpisodeBuffer};

pub use physics::{Action, PhysicsState};
