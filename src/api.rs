use crate::clusters::ClusterSet;
use crate::convergence::MonitorState;
use crate::error::{KMeansError, Result};
use crate::kernel::{BatchKernel, ScalarKernel, Simd4Kernel, Simd8Kernel};
use crate::kmeans::run_kmeans;
use crate::precision::{Element, Precision};
use crate::samples::SampleBuffer;
use crate::segment::render_segmentation;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

pub use crate::kernel::KernelChoice;

/// Configuration for a segmentation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Number of clusters (output intensity levels).
    pub k: usize,

    /// Stop once the summed absolute centroid movement of one iteration is
    /// at or below this value (default: 1e-4).
    pub epsilon: f64,

    /// Safety cap on iterations (default: 10 000). Reaching it is not an error.
    pub max_iterations: usize,

    /// Multiplier applied to centroids when rendering (default: 255.0).
    /// Must lie in `(0, 255]` so every output level fits in a byte.
    pub output_scale: f32,

    /// Nearest-centroid / sum kernel (default: `auto`).
    pub kernel: KernelChoice,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self::new(4)
    }
}

impl SegmenterConfig {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            epsilon: 1e-4,
            max_iterations: 10_000,
            output_scale: 255.0,
            kernel: KernelChoice::Auto,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_output_scale(mut self, output_scale: f32) -> Self {
        self.output_scale = output_scale;
        self
    }

    pub fn with_kernel(mut self, kernel: KernelChoice) -> Self {
        self.kernel = kernel;
        self
    }

    /// Checks every parameter before any state is built.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(KMeansError::invalid("k must be at least 1"));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(KMeansError::invalid(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        if self.max_iterations == 0 {
            return Err(KMeansError::invalid("max_iterations must be at least 1"));
        }
        if !(self.output_scale.is_finite()
            && self.output_scale > 0.0
            && self.output_scale <= 255.0)
        {
            return Err(KMeansError::invalid(format!(
                "output_scale must be in (0, 255], got {}",
                self.output_scale
            )));
        }
        Ok(())
    }
}

/// Result of a segmentation run.
#[derive(Clone, Debug, Serialize)]
pub struct Segmentation<T = f32> {
    /// Final centroid per cluster.
    pub centroids: Vec<T>,

    /// Final clusters, with the membership of the last assignment pass.
    pub clusters: ClusterSet<T>,

    /// One output level per input sample, in raster order.
    pub segmented: Array1<u8>,

    pub iterations: usize,
    pub state: MonitorState,

    /// `total_delta` of the last iteration.
    pub final_delta: f64,

    /// Empty-cluster events across all iterations (each kept its centroid).
    pub frozen_clusters: usize,

    /// Kernel the run actually used.
    pub kernel: &'static str,

    pub precision: Precision,
}

impl<T> Segmentation<T> {
    pub fn converged(&self) -> bool {
        self.state == MonitorState::Converged
    }
}

/// Runs k-means over a sample buffer and renders the segmented output.
#[derive(Clone, Debug)]
pub struct Segmenter {
    cfg: SegmenterConfig,
}

impl Segmenter {
    pub fn new(cfg: SegmenterConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.cfg
    }

    /// Clusters `samples` at their own precision (`f32` or `f64`).
    pub fn segment<T>(&self, samples: &SampleBuffer<T>) -> Result<Segmentation<T>>
    where
        T: Element,
        Simd4Kernel: BatchKernel<T>,
        Simd8Kernel: BatchKernel<T>,
    {
        match self.cfg.kernel.resolve() {
            KernelChoice::Scalar => segment_with(&ScalarKernel, &self.cfg, samples),
            KernelChoice::Simd4 => segment_with(&Simd4Kernel, &self.cfg, samples),
            _ => segment_with(&Simd8Kernel, &self.cfg, samples),
        }
    }

    /// Convenience for 8-bit grayscale pixels (normalized by 255), at
    /// single precision.
    pub fn segment_bytes(&self, pixels: &[u8]) -> Result<Segmentation<f32>> {
        let samples = SampleBuffer::<f32>::from_gray_bytes(pixels)?;
        self.segment(&samples)
    }

    /// As [`Segmenter::segment_bytes`], at double precision.
    pub fn segment_bytes_f64(&self, pixels: &[u8]) -> Result<Segmentation<f64>> {
        let samples = SampleBuffer::<f64>::from_gray_bytes(pixels)?;
        self.segment(&samples)
    }
}

fn segment_with<T: Element, K: BatchKernel<T>>(
    kernel: &K,
    cfg: &SegmenterConfig,
    samples: &SampleBuffer<T>,
) -> Result<Segmentation<T>> {
    let mut clusters = ClusterSet::<T>::initialize(cfg.k, samples.len())?;
    let stats = run_kmeans(
        kernel,
        samples,
        &mut clusters,
        cfg.epsilon,
        cfg.max_iterations,
    )?;
    let segmented = render_segmentation(kernel, samples, &clusters, cfg.output_scale);

    Ok(Segmentation {
        centroids: clusters.centroids().to_vec(),
        clusters,
        segmented,
        iterations: stats.iterations,
        state: stats.state,
        final_delta: stats.final_delta,
        frozen_clusters: stats.frozen_clusters,
        kernel: kernel.name(),
        precision: T::PRECISION,
    })
}
