//! Plain-text and JSON renderings of each command's results.
use std::io::{self, Write};

use crate::{bench::BenchSummary, model::Fit, training::GradientStep};

/// Header line printed before a scheme's results.
pub fn scheme_header(out: &mut impl Write, scheme: &str) -> io::Result<()> {
    writeln!(out, "{scheme}")
}

/// One `intercept coefficient` line per run, then `size mean_duration`.
pub fn bench_text(out: &mut impl Write, summary: &BenchSummary) -> io::Result<()> {
    for run in &summary.runs {
        writeln!(out, "{} {}", run.fit.intercept, run.fit.slope)?;
    }
    writeln!(out, "{} {}", summary.size, summary.mean_duration)
}

/// One JSON object per line.
pub fn bench_json(out: &mut impl Write, summary: &BenchSummary) -> io::Result<()> {
    serde_json::to_writer(&mut *out, summary)?;
    writeln!(out)
}

// `{:?}` keeps the `.0` on whole floats (`3.0`, not `3`).

pub fn reference(out: &mut impl Write, size: usize, fit: &Fit) -> io::Result<()> {
    writeln!(out, "{size}")?;
    writeln!(out, "inter:  {:?}", fit.intercept)?;
    writeln!(out, "b:  {:?}", fit.slope)?;
    writeln!(out)
}

pub fn gradient_step(out: &mut impl Write, step: &GradientStep) -> io::Result<()> {
    writeln!(
        out,
        "iter {} m {:?} c {:?}",
        step.epoch, step.slope, step.intercept
    )
}
