use crate::config::BenchmarkRun;
use crate::metrics::RunTimings;
use gray_kmeans::kernel::{BatchKernel, Simd4Kernel, Simd8Kernel};
use gray_kmeans::{Element, MonitorState, Precision, SampleBuffer, Segmentation, Segmenter, SegmenterConfig};
use std::time::Instant;

/// Timings and outcome of one (k, kernel) combination.
#[derive(Debug, Clone)]
pub struct ClusteringResult {
    pub kernel: &'static str,
    pub precision: Precision,
    pub repetitions: usize,
    pub best_ms: f64,
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub iterations: usize,
    pub state: MonitorState,
    pub frozen_clusters: usize,
    pub centroids: Vec<f64>,
}

/// Runs one configuration `run.repetitions` times over the same samples.
///
/// Every repetition must reproduce the first one exactly; a mismatch means
/// the engine is not deterministic and the run is rejected.
pub fn clustering_benchmark<T>(
    run: &BenchmarkRun,
    samples: &SampleBuffer<T>,
) -> Result<ClusteringResult, Box<dyn std::error::Error>>
where
    T: Element,
    Simd4Kernel: BatchKernel<T>,
    Simd8Kernel: BatchKernel<T>,
{
    let cfg = SegmenterConfig::new(run.k)
        .with_kernel(run.kernel)
        .with_epsilon(run.epsilon)
        .with_max_iterations(run.max_iterations);
    let segmenter = Segmenter::new(cfg)?;

    let mut timings = RunTimings::new();
    let mut first: Option<Segmentation<T>> = None;

    for rep in 0..run.repetitions {
        let start = Instant::now();
        let result = segmenter.segment(samples)?;
        timings.record_duration(start.elapsed());

        match &first {
            None => first = Some(result),
            Some(reference) => {
                if reference.centroids != result.centroids {
                    return Err(format!(
                        "repetition {} diverged: {:?} vs {:?}",
                        rep, reference.centroids, result.centroids
                    )
                    .into());
                }
            }
        }
    }

    let first = first.ok_or("no repetitions ran")?;
    eprintln!(
        "  {}/{} x{}: best {:.2} ms, mean {:.2} ms, {} iterations",
        first.kernel,
        first.precision.name(),
        timings.count(),
        timings.best().unwrap_or(0.0),
        timings.mean().unwrap_or(0.0),
        first.iterations
    );

    Ok(ClusteringResult {
        kernel: first.kernel,
        precision: first.precision,
        repetitions: timings.count(),
        best_ms: timings.best().unwrap_or(0.0),
        mean_ms: timings.mean().unwrap_or(0.0),
        std_dev_ms: timings.std_dev().unwrap_or(0.0),
        iterations: first.iterations,
        state: first.state,
        frozen_clusters: first.frozen_clusters,
        centroids: first.centroids.iter().map(|c| c.widen()).collect(),
    })
}
