use crate::nn::Tensor;

/// Plain stochastic gradient descent: `p -= lr * g`.
///
/// No momentum, weight decay or clipping.
pub struct Sgd {
    pub lr: f32,
}

impl Sgd {
    #[must_use]
    pub fn new(lr: f32) -> Self {
        Self { lr }
    }

    pub fn step(&self, params: &mut [(&mut Tensor, &Tensor)]) {
        for (p, g) in params {
            for (pv, gv) in p.data.iter_mut().zip(&g.data) {
                *pv -= self.lr * gv;
            }
        }
    }
}
