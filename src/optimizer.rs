use crate::model::{ops::Gradient, Fit};

/// Update rule applied to a fit once its gradient is known.
pub trait Optimizer {
    fn update(&mut self, fit: &mut Fit, grad: &Gradient);
}

/// Plain gradient descent optimization algorithm.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update`.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, scaled by `learning_rate`.
    fn update(&mut self, fit: &mut Fit, grad: &Gradient) {
        let lr = self.learning_rate;

        fit.slope -= lr * grad.slope;
        fit.intercept -= lr * grad.intercept;
    }
}
