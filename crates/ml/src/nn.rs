//! Dense layers and activations used by the policy network.

use serde::{Deserialize, Serialize};

/// Row-major `f32` buffer with an explicit shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    pub data: Vec<f32>,
    pub shape: Vec<usize>,
}

impl Tensor {
    #[must_use]
    pub fn from_vec(shape: Vec<usize>, data: Vec<f32>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { data, shape }
    }

    #[must_use]
    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self { data: vec![0.0; len], shape }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Sum of squared elements.
    #[must_use]
    pub fn sum_sq(&self) -> f32 {
        self.data.iter().map(|v| v * v).sum()
    }
}

/// Draws one sample from `N(0, std²)` with the Box–Muller transform.
pub fn gaussian(rng: &mut fastrand::Rng, std: f32) -> f32 {
    // 1 - [0, 1) keeps u1 away from ln(0)
    let u1 = 1.0 - rng.f32();
    let u2 = rng.f32();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos() * std
}

/// A fully connected layer computing `y = xᵀW + b`.
#[derive(Clone, Debug)]
pub struct Dense {
    /// Weight matrix, shape `[in_dim, out_dim]`.
    pub w: Tensor,
    /// Bias vector, shape `[out_dim]`.
    pub b: Tensor,
    in_dim: usize,
    out_dim: usize,
}

impl Dense {
    /// Creates a layer from explicit weights (row-major `[in_dim, out_dim]`) and biases.
    #[must_use]
    pub fn new(weights: Vec<f32>, bias: Vec<f32>, in_dim: usize, out_dim: usize) -> Self {
        Self {
            w: Tensor::from_vec(vec![in_dim, out_dim], weights),
            b: Tensor::from_vec(vec![out_dim], bias),
            in_dim,
            out_dim,
        }
    }

    /// Gaussian weights with the given standard deviation and zero biases.
    pub fn gaussian(in_dim: usize, out_dim: usize, std: f32, rng: &mut fastrand::Rng) -> Self {
        let weights = (0..in_dim * out_dim).map(|_| gaussian(rng, std)).collect();
        Self::new(weights, vec![0.0; out_dim], in_dim, out_dim)
    }

    #[must_use]
    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    #[must_use]
    pub fn out_dim(&self) -> usize {
        self.out_dim
    }

    #[must_use]
    pub fn forward(&self, x: &[f32]) -> Vec<f32> {
        debug_assert_eq!(x.len(), self.in_dim);
        let mut y = self.b.data.clone();
        for (i, &xi) in x.iter().enumerate() {
            let row = &self.w.data[i * self.out_dim..(i + 1) * self.out_dim];
            for (yo, &wio) in y.iter_mut().zip(row) {
                *yo += xi * wio;
            }
        }
        y
    }

    /// Zeroed gradient buffers matching this layer's parameters.
    #[must_use]
    pub fn zero_grads(&self) -> DenseGrads {
        DenseGrads {
            w: Tensor::zeros(self.w.shape.clone()),
            b: Tensor::zeros(self.b.shape.clone()),
        }
    }

    /// Adds this sample's parameter gradients into `acc` and returns the
    /// gradient with respect to the input.
    pub fn backward(&self, x: &[f32], grad: &[f32], acc: &mut DenseGrads) -> Vec<f32> {
        debug_assert_eq!(grad.len(), self.out_dim);
        let mut grad_input = vec![0.0; self.in_dim];
        for (i, &xi) in x.iter().enumerate() {
            let base = i * self.out_dim;
            for (o, &go) in grad.iter().enumerate() {
                acc.w.data[base + o] += go * xi;
                grad_input[i] += self.w.data[base + o] * go;
            }
        }
        for (gb, &go) in acc.b.data.iter_mut().zip(grad) {
            *gb += go;
        }
        grad_input
    }
}

/// Accumulated gradients for one [`Dense`] layer.
#[derive(Clone, Debug)]
pub struct DenseGrads {
    pub w: Tensor,
    pub b: Tensor,
}

impl DenseGrads {
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.b.is_finite()
    }

    #[must_use]
    pub fn sum_sq(&self) -> f32 {
        self.w.sum_sq() + self.b.sum_sq()
    }
}

/// Elementwise hyperbolic tangent.
#[must_use]
pub fn tanh(x: &[f32]) -> Vec<f32> {
    x.iter().map(|v| v.tanh()).collect()
}

/// Backpropagates through tanh given its output `h`, using `1 - h²`.
#[must_use]
pub fn tanh_backward(h: &[f32], grad: &[f32]) -> Vec<f32> {
    h.iter().zip(grad).map(|(&t, &g)| g * (1.0 - t * t)).collect()
}

/// Softmax over a logit vector, shifted by the max logit so large inputs stay finite.
#[must_use]
pub fn softmax(x: &[f32]) -> Vec<f32> {
    let m = x.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exp: Vec<f32> = x.iter().map(|&v| (v - m).exp()).collect();
    let sum: f32 = exp.iter().sum();
    exp.iter().map(|&e| e / sum).collect()
}
