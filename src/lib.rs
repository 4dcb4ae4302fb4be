pub mod bench;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod optimizer;
pub mod report;
pub mod training;

pub use config::BenchConfig;
pub use error::{BenchErr, Result};
pub use model::Fit;
