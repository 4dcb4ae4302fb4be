pub mod output;
pub mod runner;

pub use output::{parse_output, parse_pair, RunOutput};
pub use runner::{BenchRecord, BenchSummary, Runner};
