use log::debug;
use serde::Serialize;

use crate::{
    data::Dataset,
    model::{ops, Fit},
    optimizer::Optimizer,
};

/// Parameters after one full-batch update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStep {
    pub epoch: usize,
    pub slope: f64,
    pub intercept: f64,
    /// MSE of the parameters this step started from.
    pub loss: f64,
}

impl GradientStep {
    pub fn fit(&self) -> Fit {
        Fit::new(self.intercept, self.slope)
    }
}

/// Runs a fixed number of full-batch epochs, with no early stopping.
pub struct Trainer<O: Optimizer> {
    optimizer: O,
    epochs: usize,
}

impl<O: Optimizer> Trainer<O> {
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `optimizer` - Update rule applied after every epoch.
    /// * `epochs` - Exact number of epochs `train` runs.
    pub fn new(optimizer: O, epochs: usize) -> Self {
        Self { optimizer, epochs }
    }

    /// Trains from `start`, returning the parameters reached after each epoch.
    pub fn train(&mut self, data: &Dataset, start: Fit) -> Vec<GradientStep> {
        let ages = data.ages();
        let incomes = data.incomes();

        let mut fit = start;
        let mut trace = Vec::with_capacity(self.epochs);

        for epoch in 0..self.epochs {
            let loss = ops::mse(&fit, ages, incomes);
            let grad = ops::mse_gradient(&fit, ages, incomes);
            self.optimizer.update(&mut fit, &grad);

            debug!("epoch {epoch}: loss {loss}, grad {grad:?}");
            trace.push(GradientStep {
                epoch,
                slope: fit.slope,
                intercept: fit.intercept,
                loss,
            });
        }

        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::fit_closed_form, optimizer::GradientDescent};

    fn line(n: usize) -> Dataset {
        let ages: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let incomes = ages.iter().map(|x| 2.0 * x + 3.0).collect();
        Dataset::new(ages, incomes)
    }

    #[test]
    fn first_step_matches_hand_computation() {
        let data = Dataset::new(vec![1.0, 2.0, 3.0], vec![3.0, 5.0, 7.0]);
        let mut trainer = Trainer::new(GradientDescent::new(0.1), 1);

        let trace = trainer.train(&data, Fit::default());

        // m = -0.1 * (-2/3) * 34, c = -0.1 * (-2/3) * 15
        assert_eq!(trace.len(), 1);
        assert!((trace[0].slope - 6.8 / 3.0).abs() < 1e-12);
        assert!((trace[0].intercept - 1.0).abs() < 1e-12);
        assert_eq!(trace[0].loss, (9.0 + 25.0 + 49.0) / 3.0);
    }

    #[test]
    fn runs_exactly_the_requested_epochs() {
        let mut trainer = Trainer::new(GradientDescent::new(0.0001), 15);
        let trace = trainer.train(&line(10), Fit::default());

        assert_eq!(trace.len(), 15);
        assert_eq!(
            trace.iter().map(|s| s.epoch).collect::<Vec<_>>(),
            (0..15).collect::<Vec<_>>()
        );
    }

    #[test]
    fn converges_to_closed_form() {
        let data = line(10);
        let target = fit_closed_form(&data).unwrap();

        let mut trainer = Trainer::new(GradientDescent::new(0.01), 10_000);
        let trace = trainer.train(&data, Fit::default());
        let reached = trace.last().unwrap().fit();

        assert!(reached.max_abs_diff(&target) < 1e-6, "{reached:?} vs {target:?}");
        assert!((reached.intercept - 3.0).abs() < 1e-6);
        assert!((reached.slope - 2.0).abs() < 1e-6);
    }

    #[test]
    fn small_rate_moves_monotonically_toward_target() {
        let data = line(10);
        let target = Fit::new(3.0, 2.0);
        let distance = |f: Fit| {
            ((f.intercept - target.intercept).powi(2) + (f.slope - target.slope).powi(2)).sqrt()
        };

        let mut trainer = Trainer::new(GradientDescent::new(0.0001), 15);
        let trace = trainer.train(&data, Fit::default());

        let mut prev = distance(Fit::default());
        for step in &trace[..5] {
            let d = distance(step.fit());
            assert!(d < prev, "epoch {}: {d} >= {prev}", step.epoch);
            prev = d;
        }

        let mut prev_loss = f64::INFINITY;
        for step in &trace {
            assert!(step.loss < prev_loss);
            prev_loss = step.loss;
        }
    }
}
