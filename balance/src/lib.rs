#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Balance
//!
//! Training driver for the cart-pole workspace. It composes the two library
//! crates into the classic episode loop:
//!
//! -   **[`physics`]:** the cart-pole simulator the agent acts in.
//! -   **[`ml`]:** the REINFORCE policy network that learns to balance it.
//!
//! A [`Session`] owns one environment/agent pair and steps them together,
//! training at the end of every episode and keeping [`TrainingMetrics`].
//! Configuration comes from a JSON file ([`TrainConfig`]) with command-line
//! overrides applied by the `balance` binary.

pub mod app;
pub mod config;
pub mod metrics;
pub mod session;

pub use config::{ConfigOverrides, TrainConfig};
pub use metrics::TrainingMetrics;
pub use session::{EpisodeSummary, Session};

pub use ml;
pub use physics;
