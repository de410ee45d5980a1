use crate::workloads::ClusteringResult;
use gray_kmeans::{MonitorState, Precision};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Complete benchmark result for a single run
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    pub width: usize,
    pub height: usize,
    pub k: usize,
    pub kernel: String,
    pub precision: Precision,
    pub repetitions: usize,
    pub seed: u64,
    pub best_ms: f64,
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub iterations: usize,
    pub state: MonitorState,
    pub frozen_clusters: usize,
    pub centroids: Vec<f64>,
    /// Best scalar time divided by this run's best time (same k and
    /// precision).
    pub speedup_vs_scalar: Option<f64>,
}

impl BenchmarkResult {
    pub fn from_run(
        width: usize,
        height: usize,
        k: usize,
        seed: u64,
        result: ClusteringResult,
    ) -> Self {
        BenchmarkResult {
            width,
            height,
            k,
            kernel: result.kernel.to_string(),
            precision: result.precision,
            repetitions: result.repetitions,
            seed,
            best_ms: result.best_ms,
            mean_ms: result.mean_ms,
            std_dev_ms: result.std_dev_ms,
            iterations: result.iterations,
            state: result.state,
            frozen_clusters: result.frozen_clusters,
            centroids: result.centroids,
            speedup_vs_scalar: None,
        }
    }
}

/// Fills `speedup_vs_scalar` for every result whose (k, precision) also has
/// a scalar run.
pub fn attach_speedups(results: &mut [BenchmarkResult]) {
    let scalar_best: BTreeMap<(usize, &'static str), f64> = results
        .iter()
        .filter(|r| r.kernel == "scalar")
        .map(|r| ((r.k, r.precision.name()), r.best_ms))
        .collect();

    for result in results.iter_mut() {
        if let Some(&base) = scalar_best.get(&(result.k, result.precision.name())) {
            if result.best_ms > 0.0 {
                result.speedup_vs_scalar = Some(base / result.best_ms);
            }
        }
    }
}

fn create_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write results to JSON file
pub fn write_json(
    results: &[BenchmarkResult],
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Writing JSON results to {:?}", output_path);
    create_parent(output_path)?;

    let json = serde_json::to_string_pretty(results)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;

    eprintln!("Wrote {} results to JSON", results.len());
    Ok(())
}

/// Write results to CSV file
pub fn write_csv(
    results: &[BenchmarkResult],
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Writing CSV results to {:?}", output_path);
    create_parent(output_path)?;

    let mut file = File::create(output_path)?;
    writeln!(
        file,
        "width,height,k,kernel,precision,repetitions,seed,best_ms,mean_ms,std_dev_ms,iterations,state,frozen_clusters,speedup_vs_scalar,centroids"
    )?;

    for result in results {
        let centroids: Vec<String> = result.centroids.iter().map(|c| format!("{:.6}", c)).collect();
        writeln!(
            file,
            "{},{},{},{},{},{},{},{:.4},{:.4},{:.4},{},{:?},{},{},\"{}\"",
            result.width,
            result.height,
            result.k,
            result.kernel,
            result.precision.name(),
            result.repetitions,
            result.seed,
            result.best_ms,
            result.mean_ms,
            result.std_dev_ms,
            result.iterations,
            result.state,
            result.frozen_clusters,
            result
                .speedup_vs_scalar
                .map(|v| format!("{:.3}", v))
                .unwrap_or_default(),
            centroids.join(" "),
        )?;
    }

    eprintln!("Wrote {} results to CSV", results.len());
    Ok(())
}

/// Write results to Markdown file, one table per cluster count
pub fn write_markdown(
    results: &[BenchmarkResult],
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Writing Markdown results to {:?}", output_path);
    create_parent(output_path)?;

    let mut file = File::create(output_path)?;
    writeln!(file, "# K-means Benchmark Results\n")?;

    let mut grouped: BTreeMap<(&'static str, usize), Vec<&BenchmarkResult>> = BTreeMap::new();
    for result in results {
        grouped
            .entry((result.precision.name(), result.k))
            .or_default()
            .push(result);
    }

    for ((precision, k), group) in grouped {
        writeln!(
            file,
            "## {} clusters, {} precision ({}x{})\n",
            k, precision, group[0].width, group[0].height
        )?;
        writeln!(
            file,
            "| Kernel | Best (ms) | Mean (ms) | Std dev (ms) | Iterations | Speedup |"
        )?;
        writeln!(file, "|--------|-----------|-----------|--------------|------------|---------|")?;
        for result in group {
            writeln!(
                file,
                "| {} | {:.2} | {:.2} | {:.2} | {} | {} |",
                result.kernel,
                result.best_ms,
                result.mean_ms,
                result.std_dev_ms,
                result.iterations,
                result
                    .speedup_vs_scalar
                    .map(|v| format!("{:.2}x", v))
                    .unwrap_or_else(|| "-".to_string()),
            )?;
        }
        writeln!(file)?;
    }

    eprintln!("Wrote {} results to Markdown", results.len());
    Ok(())
}
