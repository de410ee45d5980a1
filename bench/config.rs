use gray_kmeans::{KernelChoice, Precision};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    pub image: ImageConfig,
    pub clusters: Vec<usize>,
    pub kernels: Vec<KernelChoice>,
    #[serde(default = "default_precisions")]
    pub precisions: Vec<Precision>,
    pub repetitions: usize,
    pub seed: u64,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    pub output_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub width: usize,
    pub height: usize,
    /// Raw 8-bit grayscale pixels (`width * height` bytes). When absent a
    /// synthetic image is generated from `seed`.
    #[serde(default)]
    pub raw_path: Option<PathBuf>,
}

fn default_precisions() -> Vec<Precision> {
    vec![Precision::Single]
}

fn default_epsilon() -> f64 {
    1e-4
}

fn default_max_iterations() -> usize {
    10_000
}

/// A single benchmark run configuration (one parameter combination)
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    pub k: usize,
    pub kernel: KernelChoice,
    pub precision: Precision,
    pub repetitions: usize,
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl BenchmarkConfig {
    /// Load config from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: BenchmarkConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Expand all parameter combinations into individual BenchmarkRun structs
    pub fn expand_combinations(&self) -> Vec<BenchmarkRun> {
        let mut runs = Vec::new();

        for &precision in &self.precisions {
            for &kernel in &self.kernels {
                for &k in &self.clusters {
                    runs.push(BenchmarkRun {
                        k,
                        kernel,
                        precision,
                        repetitions: self.repetitions.max(1),
                        epsilon: self.epsilon,
                        max_iterations: self.max_iterations,
                    });
                }
            }
        }

        runs
    }
}
