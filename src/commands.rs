use std::{io::Write, time::Duration};

use log::info;

use crate::{
    bench::Runner,
    config::BenchConfig,
    data::load_samples,
    error::Result,
    model::{fit_closed_form, Fit},
    optimizer::GradientDescent,
    report,
    training::Trainer,
};

/// Benchmarks every configured scheme at every size, in order.
///
/// Results for a size are written as soon as that size completes; the first
/// failing invocation aborts the whole batch.
pub async fn bench(cfg: &BenchConfig, json: bool, out: &mut impl Write) -> Result<()> {
    let runner = Runner::new(cfg.timeout_secs.map(Duration::from_secs));

    for scheme in &cfg.schemes {
        info!(
            "benchmarking {} ({}) at {} size(s)",
            scheme.name,
            scheme.program.display(),
            scheme.sizes.len()
        );
        if !json {
            report::scheme_header(out, &scheme.name)?;
        }

        for &size in &scheme.sizes {
            let summary = runner.run_size(scheme, size, cfg.repeats).await?;
            if json {
                report::bench_json(out, &summary)?;
            } else {
                report::bench_text(out, &summary)?;
            }
            out.flush()?;
        }
    }

    Ok(())
}

/// Closed-form fit for every reference size.
pub fn reference(cfg: &BenchConfig, out: &mut impl Write) -> Result<Vec<(usize, Fit)>> {
    let mut fits = Vec::with_capacity(cfg.reference.sizes.len());

    for &size in &cfg.reference.sizes {
        let data = load_samples(&cfg.dataset, size)?;
        let fit = fit_closed_form(&data)?;
        report::reference(out, size, &fit)?;
        fits.push((size, fit));
    }

    Ok(fits)
}

/// Fixed-length gradient descent from `m = 0, c = 0`, one line per epoch.
pub fn gradient_descent(cfg: &BenchConfig, out: &mut impl Write) -> Result<Fit> {
    let gd = &cfg.gradient_descent;
    let data = load_samples(&cfg.dataset, gd.samples)?;

    writeln!(out, "Linear Regression Gradient Descent")?;
    let mut trainer = Trainer::new(GradientDescent::new(gd.learning_rate), gd.epochs);
    let trace = trainer.train(&data, Fit::default());

    for step in &trace {
        report::gradient_step(out, step)?;
    }

    Ok(trace.last().map(|s| s.fit()).unwrap_or_default())
}
