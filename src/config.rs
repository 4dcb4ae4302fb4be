use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{BenchErr, Result};

/// Sizes passed to the BFV program.
pub const BFV_SIZES: [usize; 6] = [100, 500, 1000, 2000, 4000, 8000];
/// Sizes passed to the CKKS program; powers of two to match its slot counts.
pub const CKKS_SIZES: [usize; 6] = [512, 1024, 4096, 8192, 16384, 32768];

/// One encrypted regression program and the sizes it is benchmarked at.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemeConfig {
    pub name: String,
    pub program: PathBuf,
    /// Leading arguments placed before the size, e.g. a script for a launcher.
    #[serde(default)]
    pub args: Vec<String>,
    pub sizes: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub sizes: Vec<usize>,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            sizes: BFV_SIZES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GradientDescentConfig {
    pub samples: usize,
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for GradientDescentConfig {
    fn default() -> Self {
        Self {
            samples: 256,
            epochs: 15,
            learning_rate: 0.0001,
        }
    }
}

/// Everything the three commands need. Every field has a default, so a
/// partial (or absent) JSON file is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub dataset: PathBuf,
    pub repeats: usize,
    pub timeout_secs: Option<u64>,
    pub schemes: Vec<SchemeConfig>,
    pub reference: ReferenceConfig,
    pub gradient_descent: GradientDescentConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("cleaned_small_user_data.csv"),
            repeats: 1,
            timeout_secs: None,
            schemes: vec![
                SchemeConfig {
                    name: "bfv".into(),
                    program: PathBuf::from("linear-regression"),
                    args: Vec::new(),
                    sizes: BFV_SIZES.to_vec(),
                },
                SchemeConfig {
                    name: "ckks".into(),
                    program: PathBuf::from("linear-regression-ckks"),
                    args: Vec::new(),
                    sizes: CKKS_SIZES.to_vec(),
                },
            ],
            reference: ReferenceConfig::default(),
            gradient_descent: GradientDescentConfig::default(),
        }
    }
}

impl BenchConfig {
    /// Loads a config from a JSON file.
    ///
    /// # Errors
    /// Returns `BenchErr::Io` if the file cannot be read and
    /// `BenchErr::InvalidConfig` if it is not valid JSON for this schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| BenchErr::InvalidConfig(format!("{}: {e}", path.display())))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| BenchErr::InvalidConfig(e.to_string()))
    }

    /// Checks the invariants the commands rely on.
    pub fn validate(&self) -> Result<()> {
        if self.repeats == 0 {
            return Err(invalid("repeats must be greater than 0"));
        }
        if self.timeout_secs == Some(0) {
            return Err(invalid("timeout_secs must be greater than 0"));
        }

        for (i, scheme) in self.schemes.iter().enumerate() {
            if scheme.name.is_empty() {
                return Err(invalid(format!("schemes[{i}]: name must not be empty")));
            }
            if scheme.program.as_os_str().is_empty() {
                return Err(invalid(format!("scheme {}: program must not be empty", scheme.name)));
            }
            if scheme.sizes.is_empty() {
                return Err(invalid(format!("scheme {}: sizes must not be empty", scheme.name)));
            }
            if scheme.sizes.contains(&0) {
                return Err(invalid(format!("scheme {}: sizes must be greater than 0", scheme.name)));
            }
        }

        if self.reference.sizes.contains(&0) {
            return Err(invalid("reference sizes must be greater than 0"));
        }

        let gd = &self.gradient_descent;
        if gd.samples == 0 {
            return Err(invalid("gradient_descent.samples must be greater than 0"));
        }
        if !gd.learning_rate.is_finite() || gd.learning_rate <= 0.0 {
            return Err(invalid(format!(
                "gradient_descent.learning_rate ({}) must be a positive number",
                gd.learning_rate
            )));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> BenchErr {
    BenchErr::InvalidConfig(msg.into())
}
