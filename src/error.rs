use std::collections::TryReserveError;
use thiserror::Error;

/// Errors surfaced before or during a clustering run.
///
/// Empty clusters are not an error: their centroid is kept from the previous
/// iteration (see `kmeans::update_centroids`).
#[derive(Debug, Error)]
pub enum KMeansError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("failed to reserve {requested} member slots for cluster {cluster}")]
    AllocationFailure {
        cluster: usize,
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

impl KMeansError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        KMeansError::InvalidParameter(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, KMeansError>;
