use std::{process::Stdio, time::Duration};

use log::{debug, info};
use serde::Serialize;
use tokio::{process::Command, time};

use super::output::{parse_output, RunOutput};
use crate::{
    config::SchemeConfig,
    error::{BenchErr, Result},
    model::Fit,
};

/// One invocation of a scheme's program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchRecord {
    pub run: usize,
    pub duration: u64,
    pub fit: Fit,
}

/// All invocations at one size, plus the integer mean of their durations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchSummary {
    pub scheme: String,
    pub size: usize,
    pub mean_duration: u64,
    pub runs: Vec<BenchRecord>,
}

/// Invokes external regression programs one at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Runner {
    timeout: Option<Duration>,
}

impl Runner {
    /// Creates a runner.
    ///
    /// # Args
    /// * `timeout` - Upper bound per invocation; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Runs `<program> [args...] <size>` once and parses its stdout.
    ///
    /// # Errors
    /// - `BenchErr::Io` if the program cannot be spawned.
    /// - `BenchErr::Timeout` if it outlives the configured timeout (it is killed).
    /// - `BenchErr::ProcessFailed` on a nonzero exit status.
    /// - `BenchErr::MalformedOutput` if stdout cannot be parsed.
    pub async fn run_once(&self, scheme: &SchemeConfig, size: usize) -> Result<RunOutput> {
        let program = scheme.program.display().to_string();

        let mut cmd = Command::new(&scheme.program);
        cmd.args(&scheme.args)
            .arg(size.to_string())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!("spawning {program} {size}");
        let output = match self.timeout {
            Some(limit) => time::timeout(limit, cmd.output())
                .await
                .map_err(|_| BenchErr::Timeout {
                    program: program.clone(),
                    size,
                    limit,
                })??,
            None => cmd.output().await?,
        };

        if !output.status.success() {
            return Err(BenchErr::ProcessFailed {
                program,
                size,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        parse_output(&String::from_utf8_lossy(&output.stdout))
    }

    /// Runs a scheme `repeats` times at `size`; the first failure aborts.
    pub async fn run_size(
        &self,
        scheme: &SchemeConfig,
        size: usize,
        repeats: usize,
    ) -> Result<BenchSummary> {
        let mut runs = Vec::with_capacity(repeats);
        for run in 0..repeats {
            let RunOutput { duration, fit } = self.run_once(scheme, size).await?;
            debug!("{} size {size} run {run}: {duration} {fit:?}", scheme.name);
            runs.push(BenchRecord { run, duration, fit });
        }

        let total: u64 = runs.iter().map(|r| r.duration).sum();
        let mean_duration = total / runs.len().max(1) as u64;
        info!("{} size {size}: mean {mean_duration}", scheme.name);

        Ok(BenchSummary {
            scheme: scheme.name.clone(),
            size,
            mean_duration,
            runs,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use super::*;

    /// A scheme running `sh -c <script> stub <size>`, so `$1` is the size.
    fn sh(script: &str) -> SchemeConfig {
        SchemeConfig {
            name: "stub".into(),
            program: PathBuf::from("sh"),
            args: vec!["-c".into(), script.into(), "stub".into()],
            sizes: vec![8],
        }
    }

    #[tokio::test]
    async fn parses_stub_program_output() {
        let scheme = sh(r"printf '42\nran ok: (1.5, 2.5)\n'");
        let out = Runner::default().run_once(&scheme, 8).await.unwrap();

        assert_eq!(out.duration, 42);
        assert_eq!(out.fit, Fit::new(1.5, 2.5));
    }

    #[tokio::test]
    async fn passes_size_as_last_argument() {
        let scheme = sh(r#"printf '%s\ninter, coef: 0, 1\n' "$1""#);
        let out = Runner::default().run_once(&scheme, 4096).await.unwrap();
        assert_eq!(out.duration, 4096);
    }

    #[tokio::test]
    async fn nonzero_exit_is_reported_with_stderr() {
        let scheme = sh("echo boom >&2; exit 3");
        let err = Runner::default().run_once(&scheme, 8).await.unwrap_err();

        match err {
            BenchErr::ProcessFailed {
                size,
                status,
                stderr,
                ..
            } => {
                assert_eq!(size, 8);
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_output_fails() {
        let scheme = sh("echo not-a-number");
        assert!(matches!(
            Runner::default().run_once(&scheme, 8).await,
            Err(BenchErr::MalformedOutput { .. })
        ));
    }

    #[tokio::test]
    async fn missing_program_is_io_error() {
        let scheme = SchemeConfig {
            name: "missing".into(),
            program: PathBuf::from("/nonexistent/linear-regression"),
            args: Vec::new(),
            sizes: vec![8],
        };
        assert!(matches!(
            Runner::default().run_once(&scheme, 8).await,
            Err(BenchErr::Io(_))
        ));
    }

    #[tokio::test]
    async fn slow_program_times_out() {
        let scheme = sh("sleep 5");
        let runner = Runner::new(Some(Duration::from_millis(100)));

        assert!(matches!(
            runner.run_once(&scheme, 8).await,
            Err(BenchErr::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn run_size_averages_with_integer_division() {
        // Durations 10, 11, 13 across three runs, tracked through a counter file.
        let dir = tempfile::tempdir().unwrap();
        let counter = dir.path().join("n");
        let script = format!(
            r#"n=$(cat '{c}' 2>/dev/null || echo 0); echo $((n+1)) > '{c}'
case $n in 0) d=10;; 1) d=11;; *) d=13;; esac
printf '%s\nfit: (1, 2)\n' "$d""#,
            c = counter.display()
        );

        let summary = Runner::default()
            .run_size(&sh(&script), 8, 3)
            .await
            .unwrap();

        assert_eq!(summary.scheme, "stub");
        assert_eq!(summary.size, 8);
        assert_eq!(
            summary.runs.iter().map(|r| r.duration).collect::<Vec<_>>(),
            vec![10, 11, 13]
        );
        assert_eq!(summary.mean_duration, 11);
        assert!(summary.runs.iter().all(|r| r.fit == Fit::new(1.0, 2.0)));
    }
}
