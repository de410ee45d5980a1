mod config;
mod dataset;
mod metrics;
mod output;
mod workloads;

use config::BenchmarkConfig;
use dataset::load_image;
use gray_kmeans::{Precision, SampleBuffer};
use output::{attach_speedups, write_csv, write_json, write_markdown, BenchmarkResult};
use std::env;
use std::path::PathBuf;
use workloads::clustering_benchmark;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // `cargo bench` passes `--bench`; the config path is the first other argument.
    let config_path = env::args()
        .skip(1)
        .find(|arg| !arg.starts_with("--"))
        .unwrap_or_else(|| "bench/config.yaml".to_string());
    eprintln!("Loading config from: {}", config_path);

    let config = BenchmarkConfig::from_file(&config_path)?;
    let runs = config.expand_combinations();
    eprintln!("Expanded to {} benchmark runs", runs.len());

    let pixels = load_image(&config.image, config.seed)?;
    let single = SampleBuffer::<f32>::from_gray_bytes(&pixels)?;
    let double = SampleBuffer::<f64>::from_gray_bytes(&pixels)?;
    let (lo, hi) = single.bounds();
    eprintln!(
        "Loaded {} samples (range {:.3}..{:.3})",
        single.len(),
        lo,
        hi
    );

    let mut results = Vec::new();
    for (idx, run) in runs.iter().enumerate() {
        eprintln!(
            "\n=== Run {}/{}: k={}, kernel={:?}, precision={} ===",
            idx + 1,
            runs.len(),
            run.k,
            run.kernel,
            run.precision.name()
        );

        let outcome = match run.precision {
            Precision::Single => clustering_benchmark(run, &single),
            Precision::Double => clustering_benchmark(run, &double),
        };
        match outcome {
            Ok(result) => results.push(BenchmarkResult::from_run(
                config.image.width,
                config.image.height,
                run.k,
                config.seed,
                result,
            )),
            Err(e) => {
                eprintln!("ERROR: run failed: {}", e);
                continue;
            }
        }
    }

    attach_speedups(&mut results);

    let json_path = PathBuf::from(format!("{}.json", config.output_prefix));
    let csv_path = PathBuf::from(format!("{}.csv", config.output_prefix));
    let md_path = PathBuf::from(format!("{}.md", config.output_prefix));

    write_json(&results, &json_path)?;
    write_csv(&results, &csv_path)?;
    write_markdown(&results, &md_path)?;

    eprintln!("\n=== Benchmark Complete ===");
    eprintln!("Results written to:");
    eprintln!("  - {}", json_path.display());
    eprintln!("  - {}", csv_path.display());
    eprintln!("  - {}", md_path.display());

    Ok(())
}
