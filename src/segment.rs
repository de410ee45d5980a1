use crate::clusters::ClusterSet;
use crate::kernel::BatchKernel;
use crate::precision::Element;
use crate::samples::SampleBuffer;
use ndarray::Array1;

/// Maps every sample to its nearest final centroid, scaled by `output_scale`
/// and truncated to a byte.
///
/// The nearest centroid is recomputed with the same kernel the loop used, so
/// ties resolve exactly as they did during clustering.
pub fn render_segmentation<T: Element, K: BatchKernel<T>>(
    kernel: &K,
    samples: &SampleBuffer<T>,
    clusters: &ClusterSet<T>,
    output_scale: f32,
) -> Array1<u8> {
    let packed = kernel.pack(clusters.centroids());

    // One output level per cluster.
    let levels: Vec<u8> = clusters
        .centroids()
        .iter()
        .map(|&c| c.to_level(output_scale))
        .collect();

    samples
        .as_slice()
        .iter()
        .map(|&x| levels[kernel.nearest(&packed, x)])
        .collect()
}
