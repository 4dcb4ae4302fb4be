pub mod ols;
pub mod ops;

use serde::Serialize;

pub use ols::{fit_closed_form, Sums};

/// A fitted line `income = slope * age + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Fit {
    pub intercept: f64,
    pub slope: f64,
}

impl Fit {
    pub fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    #[inline]
    pub fn predict(&self, age: f64) -> f64 {
        self.slope * age + self.intercept
    }

    /// Largest absolute difference between the two coefficients of `self` and `other`.
    pub fn max_abs_diff(&self, other: &Fit) -> f64 {
        (self.intercept - other.intercept)
            .abs()
            .max((self.slope - other.slope).abs())
    }
}
