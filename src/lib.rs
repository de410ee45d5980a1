pub mod api;
pub use api::{KernelChoice, Segmentation, Segmenter, SegmenterConfig};

pub mod error;
pub use error::{KMeansError, Result};

pub mod kernel;
pub mod precision;
pub use precision::{Element, Precision};

pub mod samples;
pub use samples::SampleBuffer;

pub mod clusters;
pub use clusters::{Cluster, ClusterSet};

pub mod convergence;
pub use convergence::MonitorState;

// Internal implementation modules (not part of the public API).
#[cfg(not(feature = "internal_tests"))]
mod kmeans;
#[cfg(feature = "internal_tests")]
pub mod kmeans;

#[cfg(not(feature = "internal_tests"))]
mod segment;
#[cfg(feature = "internal_tests")]
pub mod segment;
