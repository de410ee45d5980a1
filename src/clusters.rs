use crate::error::{KMeansError, Result};
use crate::precision::Element;
use serde::Serialize;

/// Borrowed view of one cluster: its centroid and the indices of the samples
/// assigned to it.
#[derive(Clone, Copy, Debug)]
pub struct Cluster<'a, T> {
    pub centroid: T,
    members: &'a [usize],
}

impl<'a, T> Cluster<'a, T> {
    /// Sample indices in ascending (raster) order.
    pub fn members(&self) -> &'a [usize] {
        self.members
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Fixed set of K clusters, owned by a single run.
///
/// Centroids are stored contiguously so the kernels can pack them straight
/// from [`ClusterSet::centroids`].
#[derive(Clone, Debug, Serialize)]
pub struct ClusterSet<T = f32> {
    centroids: Vec<T>,
    members: Vec<Vec<usize>>,
}

impl<T: Element> ClusterSet<T> {
    /// Seeds `k` centroids linearly over `[0, 1]`: centroid `i` is
    /// `i / (k - 1)`, or `0` when `k == 1`.
    ///
    /// Each member list reserves `ceil(image_size / k)` slots up front.
    pub fn initialize(k: usize, image_size: usize) -> Result<Self> {
        if k == 0 {
            return Err(KMeansError::invalid("k must be at least 1"));
        }

        let per_cluster = image_size.div_ceil(k);
        let mut centroids = Vec::with_capacity(k);
        let mut members = Vec::with_capacity(k);
        for i in 0..k {
            centroids.push(if k == 1 {
                T::zero()
            } else {
                T::from_index(i) / T::from_index(k - 1)
            });

            let mut list = Vec::new();
            list.try_reserve_exact(per_cluster)
                .map_err(|source| KMeansError::AllocationFailure {
                    cluster: i,
                    requested: per_cluster,
                    source,
                })?;
            members.push(list);
        }

        Ok(ClusterSet { centroids, members })
    }

    /// Builds a set from explicit centroid values with empty memberships.
    pub fn from_centroids(centroids: &[T]) -> Result<Self> {
        if centroids.is_empty() {
            return Err(KMeansError::invalid("k must be at least 1"));
        }
        Ok(ClusterSet {
            centroids: centroids.to_vec(),
            members: vec![Vec::new(); centroids.len()],
        })
    }

    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    pub fn clusters(&self) -> impl ExactSizeIterator<Item = Cluster<'_, T>> + '_ {
        self.centroids
            .iter()
            .zip(&self.members)
            .map(|(&centroid, members)| Cluster { centroid, members })
    }

    pub fn get(&self, c: usize) -> Cluster<'_, T> {
        Cluster {
            centroid: self.centroids[c],
            members: &self.members[c],
        }
    }

    pub fn centroid(&self, c: usize) -> T {
        self.centroids[c]
    }

    pub fn set_centroid(&mut self, c: usize, value: T) {
        self.centroids[c] = value;
    }

    /// Current centroids, in cluster order.
    pub fn centroids(&self) -> &[T] {
        &self.centroids
    }

    /// Empties every member list, keeping its capacity.
    pub fn clear_members(&mut self) {
        for list in &mut self.members {
            list.clear();
        }
    }

    /// Appends a sample index to cluster `c`, growing the list fallibly.
    pub fn push_member(&mut self, c: usize, sample: usize) -> Result<()> {
        let members = &mut self.members[c];
        if members.len() == members.capacity() {
            let requested = members.capacity().max(1);
            members
                .try_reserve(requested)
                .map_err(|source| KMeansError::AllocationFailure {
                    cluster: c,
                    requested,
                    source,
                })?;
        }
        members.push(sample);
        Ok(())
    }

    /// Sum of absolute centroid movement against a previous snapshot.
    pub fn total_delta(&self, previous: &[T]) -> f64 {
        self.centroids
            .iter()
            .zip(previous)
            .map(|(&current, &prev)| (current - prev).abs().widen())
            .sum()
    }
}
