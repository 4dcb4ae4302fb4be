use std::{io, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use linreg_bench::{commands, BenchConfig};

/// Compare encrypted linear regression programs against plain-text references.
#[derive(Debug, Parser)]
#[command(name = "linreg-bench", version, about)]
struct Cli {
    /// JSON config file; built-in defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// User data CSV (overrides the config).
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the external encrypted regression programs at every size.
    Bench {
        /// Print one JSON object per size instead of text.
        #[arg(long)]
        json: bool,
        /// Invocations per size; the reported duration is their mean.
        #[arg(long)]
        repeats: Option<usize>,
        /// Kill an invocation after this many seconds.
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Closed-form least squares at every reference size.
    Reference {
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,
    },
    /// Fixed-length gradient descent over the first samples.
    GradientDescent {
        #[arg(long)]
        samples: Option<usize>,
        #[arg(long)]
        epochs: Option<usize>,
        #[arg(long)]
        learning_rate: Option<f64>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<BenchConfig> {
    let mut cfg = match &cli.config {
        Some(path) => BenchConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BenchConfig::default(),
    };

    if let Some(data) = &cli.data {
        cfg.dataset = data.clone();
    }

    match &cli.command {
        Command::Bench {
            repeats, timeout, ..
        } => {
            if let Some(r) = repeats {
                cfg.repeats = *r;
            }
            if timeout.is_some() {
                cfg.timeout_secs = *timeout;
            }
        }
        Command::Reference { sizes } => {
            if let Some(sizes) = sizes {
                cfg.reference.sizes = sizes.clone();
            }
        }
        Command::GradientDescent {
            samples,
            epochs,
            learning_rate,
        } => {
            let gd = &mut cfg.gradient_descent;
            gd.samples = samples.unwrap_or(gd.samples);
            gd.epochs = epochs.unwrap_or(gd.epochs);
            gd.learning_rate = learning_rate.unwrap_or(gd.learning_rate);
        }
    }

    cfg.validate()?;
    Ok(cfg)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Bench { json, .. } => {
            commands::bench(&cfg, json, &mut stdout)
                .await
                .context("benchmark aborted")?;
        }
        Command::Reference { .. } => {
            commands::reference(&cfg, &mut stdout)
                .with_context(|| format!("reference fit over {}", cfg.dataset.display()))?;
        }
        Command::GradientDescent { .. } => {
            let fit = commands::gradient_descent(&cfg, &mut stdout)
                .with_context(|| format!("gradient descent over {}", cfg.dataset.display()))?;
            info!("final fit: {fit:?}");
        }
    }

    Ok(())
}
