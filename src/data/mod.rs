pub mod dataset;
pub mod loader;

pub use dataset::{Dataset, Sample};
pub use loader::{load_samples, read_rows};
