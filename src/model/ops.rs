//! Loss and gradient kernels for the one-feature linear model.
use ndarray::{Array1, ArrayView1};

use super::Fit;

/// Partial derivatives of the mean squared error with respect to the fit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gradient {
    pub slope: f64,
    pub intercept: f64,
}

/// `income - (slope * age + intercept)` for every sample.
pub fn residuals(fit: &Fit, ages: ArrayView1<f64>, incomes: ArrayView1<f64>) -> Array1<f64> {
    let predicted = ages.mapv(|x| fit.predict(x));
    &incomes - &predicted
}

/// loss = (1/n) * sum_i (y_i - yhat_i)^2
pub fn mse(fit: &Fit, ages: ArrayView1<f64>, incomes: ArrayView1<f64>) -> f64 {
    residuals(fit, ages, incomes)
        .mapv(|r| r * r)
        .mean()
        .unwrap_or_default()
}

/// Computes the MSE gradient over a full batch:
///
/// - dL/dm = (-2/n) * sum_i (x_i * r_i)
/// - dL/dc = (-2/n) * sum_i (r_i)
///
/// where `r_i = y_i - yhat_i`.
///
/// # Panics
/// - if `ages` and `incomes` differ in length
/// - if the batch is empty
pub fn mse_gradient(fit: &Fit, ages: ArrayView1<f64>, incomes: ArrayView1<f64>) -> Gradient {
    assert_eq!(ages.len(), incomes.len(), "ages and incomes must match");
    assert!(!ages.is_empty(), "batch must be non-empty");

    let r = residuals(fit, ages, incomes);
    let scale = -2.0 / ages.len() as f64;

    Gradient {
        slope: scale * ages.dot(&r),
        intercept: scale * r.sum(),
    }
}
