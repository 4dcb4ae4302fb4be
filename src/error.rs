use std::{error::Error, fmt, io, process::ExitStatus, time::Duration};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, BenchErr>;

/// Failures raised while loading data, fitting, or driving external programs.
#[derive(Debug)]
pub enum BenchErr {
    Io(io::Error),
    /// A CSV row could not be turned into a sample.
    Csv {
        line: u64,
        msg: String,
    },
    /// The data file has a header but no rows.
    EmptyDataset,
    ProcessFailed {
        program: String,
        size: usize,
        status: ExitStatus,
        stderr: String,
    },
    Timeout {
        program: String,
        size: usize,
        limit: Duration,
    },
    /// Subprocess stdout did not have the expected shape.
    MalformedOutput {
        what: &'static str,
        got: String,
    },
    /// `N·Sxx − Sx²` vanished, the ages carry no spread.
    DegenerateFit {
        denominator: f64,
    },
    InvalidConfig(String),
}

impl fmt::Display for BenchErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchErr::Io(e) => write!(f, "io error: {e}"),
            BenchErr::Csv { line, msg } => write!(f, "invalid csv row at line {line}: {msg}"),
            BenchErr::EmptyDataset => write!(f, "dataset has no rows"),
            BenchErr::ProcessFailed {
                program,
                size,
                status,
                stderr,
            } => {
                write!(f, "`{program} {size}` exited with {status}")?;
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr.trim_end())?;
                }
                Ok(())
            }
            BenchErr::Timeout {
                program,
                size,
                limit,
            } => write!(f, "`{program} {size}` did not finish within {limit:?}"),
            BenchErr::MalformedOutput { what, got } => {
                write!(f, "malformed program output: expected {what}, got {got:?}")
            }
            BenchErr::DegenerateFit { denominator } => write!(
                f,
                "cannot fit a line: denominator N*Sxx - Sx^2 is {denominator} (ages have no spread)"
            ),
            BenchErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for BenchErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BenchErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BenchErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for BenchErr {
    fn from(value: csv::Error) -> Self {
        let line = value.position().map(|p| p.line()).unwrap_or_default();
        let msg = value.to_string();
        match value.into_kind() {
            csv::ErrorKind::Io(e) => Self::Io(e),
            _ => Self::Csv { line, msg },
        }
    }
}
