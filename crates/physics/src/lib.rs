#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Cart-pole physics
//!
//! The environment half of the balancing workspace: a deterministic simulator
//! of an inverted pendulum on a cart, integrated with explicit Euler steps.
//!
//! ## Key Components
//!
//! -   **State:** [`PhysicsState`] holds the four scalars of the system and
//!     views as a plain `[f32; 4]` observation.
//! -   **Actions:** [`Action`] is the binary push left / push right. Raw
//!     indices go through `Action::try_from`, which rejects anything else.
//! -   **Simulation:** [`CartPole`] owns the state and a seeded random source
//!     used only on reset, so a fixed seed and action sequence always
//!     reproduce the same trajectory.
//!
//! ## Usage
//!
//! ```rust
//! use physics::{Action, CartPole};
//!
//! let mut env = CartPole::new(42);
//! let mut steps = 0;
//! loop {
//!     let step = env.step(if steps % 2 == 0 { Action::Left } else { Action::Right });
//!     steps += 1;
//!     if step.done || steps == 100 {
//!         break;
//!     }
//! }
//! env.reset();
//! ```

pub mod cartpole;
pub mod error;
pub mod types;

pub use cartpole::{CartPole, CartPoleConfig, Step};
pub use error::PhysicsError;
pub use types::{Action, PhysicsState};
