use crate::error::PhysicsError;

/// Full state of the cart-pole system.
///
/// Laid out as four contiguous `f32`s so it can be viewed as an observation
/// vector without copying through [`PhysicsState::as_array`].
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PhysicsState {
    /// Cart position (m).
    pub x: f32,
    /// Cart velocity (m/s).
    pub x_dot: f32,
    /// Pole angle from vertical (rad).
    pub theta: f32,
    /// Pole angular velocity (rad/s).
    pub theta_dot: f32,
}

impl PhysicsState {
    /// Number of scalars in the state vector.
    pub const DIM: usize = 4;

    #[must_use]
    pub const fn new(x: f32, x_dot: f32, theta: f32, theta_dot: f32) -> Self {
        Self { x, x_dot, theta, theta_dot }
    }

    #[must_use]
    pub fn as_array(&self) -> &[f32; Self::DIM] {
        bytemuck::cast_ref(self)
    }

    #[must_use]
    pub fn to_array(self) -> [f32; Self::DIM] {
        bytemuck::cast(self)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }

    /// Whether the cart or the pole has left the allowed region.
    #[must_use]
    pub fn is_out_of_bounds(&self, position_limit: f32, angle_limit: f32) -> bool {
        self.x.abs() > position_limit || self.theta.abs() > angle_limit
    }
}

impl From<[f32; PhysicsState::DIM]> for PhysicsState {
    fn from(v: [f32; PhysicsState::DIM]) -> Self {
        bytemuck::cast(v)
    }
}

/// Discrete push applied to the cart.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left = 0,
    Right = 1,
}

impl Action {
    /// Number of distinct actions.
    pub const COUNT: usize = 2;

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Sign of the horizontal force this action applies.
    #[must_use]
    pub const fn direction(self) -> f32 {
        match self {
            Action::Left => -1.0,
            Action::Right => 1.0,
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = PhysicsError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Left),
            1 => Ok(Action::Right),
            other => Err(PhysicsError::InvalidAction(other)),
        }
    }
}
