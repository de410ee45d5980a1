use crate::clusters::ClusterSet;
use crate::convergence::{ConvergenceMonitor, MonitorState};
use crate::error::{KMeansError, Result};
use crate::kernel::BatchKernel;
use crate::precision::Element;
use crate::samples::SampleBuffer;
use log::{debug, info, warn};

/// Outcome of one clustering loop.
#[derive(Clone, Debug)]
pub struct RunStats {
    pub iterations: usize,
    pub state: MonitorState,
    pub final_delta: f64,
    /// Number of (iteration, cluster) pairs where a cluster came up empty
    /// and kept its previous centroid.
    pub frozen_clusters: usize,
}

/// Runs assignment + update until the centroids move by at most `epsilon`
/// (L1 over all clusters) or `max_iterations` passes have run.
///
/// `clusters` must already be seeded; on return it holds the final centroids
/// and the membership of the last assignment pass.
pub fn run_kmeans<T: Element, K: BatchKernel<T>>(
    kernel: &K,
    samples: &SampleBuffer<T>,
    clusters: &mut ClusterSet<T>,
    epsilon: f64,
    max_iterations: usize,
) -> Result<RunStats> {
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(KMeansError::invalid(format!(
            "epsilon must be a positive finite number, got {}",
            epsilon
        )));
    }
    if max_iterations == 0 {
        return Err(KMeansError::invalid("max_iterations must be at least 1"));
    }
    if samples.is_empty() {
        return Err(KMeansError::invalid("sample buffer cannot be empty"));
    }

    info!(
        "k-means: n={}, k={}, kernel={}, precision={}, epsilon={}, max_iterations={}",
        samples.len(),
        clusters.k(),
        kernel.name(),
        T::PRECISION.name(),
        epsilon,
        max_iterations
    );

    let data = samples.as_slice();
    let mut monitor = ConvergenceMonitor::new(epsilon, max_iterations);
    let mut frozen_clusters = 0;

    loop {
        monitor.begin_iteration(clusters);

        assign_points(kernel, data, clusters)?;
        frozen_clusters += update_centroids(kernel, data, clusters);

        let state = monitor.end_iteration(clusters);
        let delta = monitor.last_delta().unwrap_or(0.0);
        debug!(
            "iteration {}: total_delta={:.6}",
            monitor.iterations(),
            delta
        );

        match state {
            MonitorState::Converged => {
                info!("converged after {} iterations", monitor.iterations());
                break;
            }
            MonitorState::MaxIterReached => {
                warn!(
                    "stopped at iteration cap {} (total_delta={:.6})",
                    max_iterations, delta
                );
                break;
            }
            _ => {}
        }
    }

    Ok(RunStats {
        iterations: monitor.iterations(),
        state: monitor.state(),
        final_delta: monitor.last_delta().unwrap_or(0.0),
        frozen_clusters,
    })
}

/// Clears every member list and reassigns each sample to its nearest
/// centroid. Indices are visited in order, so every list stays sorted.
pub fn assign_points<T: Element, K: BatchKernel<T>>(
    kernel: &K,
    samples: &[T],
    clusters: &mut ClusterSet<T>,
) -> Result<()> {
    let packed = kernel.pack(clusters.centroids());
    clusters.clear_members();

    for (i, &x) in samples.iter().enumerate() {
        let c = kernel.nearest(&packed, x);
        clusters.push_member(c, i)?;
    }
    Ok(())
}

/// Recomputes every non-empty centroid as the mean of its members.
///
/// An empty cluster keeps its previous centroid instead of dividing by zero.
/// Returns how many clusters were empty.
pub fn update_centroids<T: Element, K: BatchKernel<T>>(
    kernel: &K,
    samples: &[T],
    clusters: &mut ClusterSet<T>,
) -> usize {
    let mut frozen = 0;
    for c in 0..clusters.k() {
        let cluster = clusters.get(c);
        if cluster.is_empty() {
            debug!(
                "cluster {} is empty, keeping centroid {:.6}",
                c, cluster.centroid
            );
            frozen += 1;
            continue;
        }

        let sum = kernel.gather_sum(samples, cluster.members());
        let mean = T::narrow(sum / cluster.count() as f64);
        clusters.set_centroid(c, mean);
    }
    frozen
}
