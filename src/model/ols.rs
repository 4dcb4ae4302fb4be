//! Closed-form ordinary least squares for one feature.
use log::debug;

use super::Fit;
use crate::{
    data::Dataset,
    error::{BenchErr, Result},
};

/// Summary statistics the closed-form solution is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sums {
    pub n: f64,
    pub x: f64,
    pub y: f64,
    pub xx: f64,
    pub xy: f64,
}

impl Sums {
    pub fn of(data: &Dataset) -> Self {
        let ages = data.ages();
        let incomes = data.incomes();

        Self {
            n: data.len() as f64,
            x: ages.sum(),
            y: incomes.sum(),
            xx: ages.dot(&ages),
            xy: ages.dot(&incomes),
        }
    }

    /// `N·Sxx − Sx²`, shared by both coefficients.
    #[inline]
    pub fn denominator(&self) -> f64 {
        self.n * self.xx - self.x * self.x
    }

    /// `Sy·Sxx − Sx·Sxy`
    #[inline]
    pub fn intercept_numerator(&self) -> f64 {
        self.y * self.xx - self.x * self.xy
    }

    /// `N·Sxy − Sx·Sy`
    #[inline]
    pub fn slope_numerator(&self) -> f64 {
        self.n * self.xy - self.x * self.y
    }

    /// Solves for the fit.
    ///
    /// # Errors
    /// `BenchErr::DegenerateFit` when the denominator is zero or not finite.
    pub fn solve(&self) -> Result<Fit> {
        let div = self.denominator();
        if div == 0.0 || !div.is_finite() {
            return Err(BenchErr::DegenerateFit { denominator: div });
        }

        debug!(
            "a={} b={} div={div}",
            self.intercept_numerator(),
            self.slope_numerator()
        );

        Ok(Fit {
            intercept: self.intercept_numerator() / div,
            slope: self.slope_numerator() / div,
        })
    }
}

/// Fits `income = slope * age + intercept` over `data` with the closed-form
/// least-squares formulas.
///
/// # Errors
/// `BenchErr::DegenerateFit` when every age is the same. Identical fractional
/// ages leave rounding noise in the denominator instead of an exact zero, so
/// the spread is checked on the ages themselves.
pub fn fit_closed_form(data: &Dataset) -> Result<Fit> {
    let sums = Sums::of(data);

    let ages = data.ages();
    if ages.iter().all(|&age| age == ages[0]) {
        return Err(BenchErr::DegenerateFit {
            denominator: sums.denominator(),
        });
    }

    sums.solve()
}
