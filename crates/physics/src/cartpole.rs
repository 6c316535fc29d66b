//! CartPole environment for reinforcement learning
//!
//! Classic Barto–Sutton–Anderson cart-pole: a pole hinged on a cart that moves
//! along a frictionless track. The agent pushes the cart left or right with a
//! fixed force and the episode ends once the cart leaves the track or the pole
//! tilts too far.

use crate::error::PhysicsError;
use crate::types::{Action, PhysicsState};

/// Physical constants and episode limits for a [`CartPole`]
#[derive(Clone, Debug, PartialEq)]
pub struct CartPoleConfig {
    /// Gravitational acceleration (m/s²)
    pub gravity: f32,
    /// Cart mass in kg
    pub cart_mass: f32,
    /// Pole mass in kg
    pub pole_mass: f32,
    /// Half of the pole length in meters
    pub pole_half_length: f32,
    /// Magnitude of the force applied to the cart by either action
    pub force_magnitude: f32,
    /// Integration time step in seconds
    pub tau: f32,
    /// Position threshold for failure detection (meters)
    pub position_limit: f32,
    /// Angle threshold for failure detection (radians)
    pub angle_limit: f32,
    /// Half-width of the uniform range every state component is drawn from on reset
    pub reset_range: f32,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            cart_mass: 1.0,
            pole_mass: 0.1,
            pole_half_length: 0.5,
            force_magnitude: 10.0,
            tau: 0.02,
            position_limit: 2.4,
            angle_limit: 12.0_f32.to_radians(),
            reset_range: 0.025,
        }
    }
}

impl CartPoleConfig {
    #[must_use]
    pub fn total_mass(&self) -> f32 {
        self.cart_mass + self.pole_mass
    }

    #[must_use]
    pub fn pole_mass_length(&self) -> f32 {
        self.pole_mass * self.pole_half_length
    }
}

/// Result of advancing the simulation by one time step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub state: PhysicsState,
    /// Always `1.0`: one more step survived.
    pub reward: f32,
    pub done: bool,
}

/// A single cart-pole simulator with its own seeded random source.
///
/// Randomness only enters through [`CartPole::reset`]; [`CartPole::step`] is a
/// pure function of the current state and the action.
pub struct CartPole {
    config: CartPoleConfig,
    state: PhysicsState,
    rng: fastrand::Rng,
}

impl CartPole {
    /// Creates a cart-pole with the default constants and a random initial state.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(CartPoleConfig::default(), seed)
    }

    #[must_use]
    pub fn with_config(config: CartPoleConfig, seed: u64) -> Self {
        let mut env = Self {
            config,
            state: PhysicsState::default(),
            rng: fastrand::Rng::with_seed(seed),
        };
        env.reset();
        env
    }

    #[must_use]
    pub fn config(&self) -> &CartPoleConfig {
        &self.config
    }

    /// Current state of the simulation.
    #[must_use]
    pub fn state(&self) -> PhysicsState {
        self.state
    }

    /// Places the simulation in an arbitrary state.
    pub fn set_state(&mut self, state: PhysicsState) {
        self.state = state;
    }

    /// Draws every state component uniformly from `[-reset_range, reset_range]`.
    pub fn reset(&mut self) -> PhysicsState {
        let r = self.config.reset_range;
        let mut draw = || (self.rng.f32() * 2.0 - 1.0) * r;
        self.state = PhysicsState::new(draw(), draw(), draw(), draw());
        tracing::trace!(state = ?self.state, "cartpole reset");
        self.state
    }

    /// Advances the simulation one time step with explicit Euler integration.
    pub fn step(&mut self, action: Action) -> Step {
        let c = &self.config;
        let PhysicsState { x, x_dot, theta, theta_dot } = self.state;

        let force = action.direction() * c.force_magnitude;
        let (sin_theta, cos_theta) = theta.sin_cos();
        let total_mass = c.total_mass();
        let pole_mass_length = c.pole_mass_length();

        let temp = (force + pole_mass_length * theta_dot * theta_dot * sin_theta) / total_mass;
        let theta_acc = (c.gravity * sin_theta - cos_theta * temp)
            / (c.pole_half_length * (4.0 / 3.0 - c.pole_mass * cos_theta * cos_theta / total_mass));
        let x_acc = temp - pole_mass_length * theta_acc * cos_theta / total_mass;

        self.state = PhysicsState::new(
            x + c.tau * x_dot,
            x_dot + c.tau * x_acc,
            theta + c.tau * theta_dot,
            theta_dot + c.tau * theta_acc,
        );

        let done = self.is_terminal();
        if done {
            tracing::trace!(state = ?self.state, "cartpole terminal");
        }
        Step { state: self.state, reward: 1.0, done }
    }

    /// Like [`CartPole::step`] but takes a raw action index.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidAction`] for anything other than `0` or
    /// `1`; the state is left untouched.
    pub fn step_index(&mut self, action: usize) -> Result<Step, PhysicsError> {
        let action = Action::try_from(action)?;
        Ok(self.step(action))
    }

    /// Whether the current state ends the episode.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state
            .is_out_of_bounds(self.config.position_limit, self.config.angle_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn push_right_from_rest_accelerates_cart_right() {
        let mut env = CartPole::new(0);
        env.set_state(PhysicsState::default());
        let first = env.step(Action::Right);
        // position integrates the pre-step velocity, which was zero
        assert_eq!(first.state.x, 0.0);
        assert!(first.state.x_dot > 0.0);
        // pushing the cart right tips the pole left
        assert!(first.state.theta_dot < 0.0);
        let second = env.step(Action::Right);
        assert!(second.state.x > 0.0);
    }

    #[test]
    fn first_step_from_rest_matches_closed_form() {
        let mut env = CartPole::new(0);
        env.set_state(PhysicsState::default());
        let step = env.step(Action::Right);
        // theta = 0: temp = F/M, theta_acc = -temp / (l (4/3 - m/M))
        let temp = 10.0_f32 / 1.1;
        let theta_acc = -temp / (0.5 * (4.0 / 3.0 - 0.1 / 1.1));
        let x_acc = temp - 0.05 * theta_acc / 1.1;
        assert_relative_eq!(step.state.x_dot, 0.02 * x_acc, epsilon = 1e-6);
        assert_relative_eq!(step.state.theta_dot, 0.02 * theta_acc, epsilon = 1e-6);
    }
}
