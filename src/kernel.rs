//! Batched distance / sum kernels.
//!
//! Every kernel answers the same two questions the clustering loop asks:
//! which centroid is nearest to a sample, and what is the sum of a cluster's
//! member samples. [`ScalarKernel`] is the reference; the SIMD kernels only
//! change throughput. For identical inputs they return the same argmin, with
//! ties going to the lowest cluster index, and sums that agree to within
//! floating-point reordering.
//!
//! Each kernel runs on both element types. At single precision a lane group
//! is one `f32x4`/`f32x8`; at double precision it is one or two `f64x4`.

use crate::precision::Element;
use serde::{Deserialize, Serialize};
use wide::{f32x4, f32x8, f64x4};

/// One nearest-centroid / member-sum implementation for element type `T`,
/// parameterized by lane width.
pub trait BatchKernel<T: Element> {
    /// Centroids compared per lane group.
    const LANES: usize;

    /// Centroids laid out for this kernel (padded to whole lane groups).
    type Packed;

    fn name(&self) -> &'static str;

    /// Lays out the centroids for [`BatchKernel::nearest`]. Padding lanes
    /// hold `+inf` so their distance can never win.
    fn pack(&self, centroids: &[T]) -> Self::Packed;

    /// Index of the centroid closest to `sample`; the lowest index wins ties.
    fn nearest(&self, packed: &Self::Packed, sample: T) -> usize;

    /// Sum of `samples[i]` over `members`, accumulated in `f64`.
    fn gather_sum(&self, samples: &[T], members: &[usize]) -> f64;
}

/// Reference kernel: linear scan, strict less-than.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarKernel;

/// 4-lane kernel (4 distances per step, 4 partial sums).
#[derive(Clone, Copy, Debug, Default)]
pub struct Simd4Kernel;

/// 8-lane kernel (8 distances per step, 8 partial sums).
#[derive(Clone, Copy, Debug, Default)]
pub struct Simd8Kernel;

impl<T: Element> BatchKernel<T> for ScalarKernel {
    const LANES: usize = 1;
    type Packed = Vec<T>;

    fn name(&self) -> &'static str {
        "scalar"
    }

    fn pack(&self, centroids: &[T]) -> Vec<T> {
        centroids.to_vec()
    }

    #[inline]
    fn nearest(&self, packed: &Vec<T>, sample: T) -> usize {
        let mut best_c = 0;
        let mut best_dist = T::infinity();
        for (c, &centroid) in packed.iter().enumerate() {
            let dist = (sample - centroid).abs();
            if dist < best_dist {
                best_dist = dist;
                best_c = c;
            }
        }
        best_c
    }

    fn gather_sum(&self, samples: &[T], members: &[usize]) -> f64 {
        members.iter().map(|&i| samples[i].widen()).sum()
    }
}

/// Sums member samples in `GROUPS` f64x4 accumulators, i.e. `4 * GROUPS`
/// partial sums, then a scalar tail and one horizontal reduction.
#[inline]
fn gather_sum_f64x4<T: Element, const GROUPS: usize>(samples: &[T], members: &[usize]) -> f64 {
    let mut acc = [f64x4::splat(0.0); GROUPS];
    let mut chunks = members.chunks_exact(GROUPS * 4);

    for chunk in &mut chunks {
        for (lane_acc, quad) in acc.iter_mut().zip(chunk.chunks_exact(4)) {
            *lane_acc += f64x4::from([
                samples[quad[0]].widen(),
                samples[quad[1]].widen(),
                samples[quad[2]].widen(),
                samples[quad[3]].widen(),
            ]);
        }
    }

    let mut tail = 0.0;
    for &i in chunks.remainder() {
        tail += samples[i].widen();
    }

    acc.iter().map(|a| a.reduce_add()).sum::<f64>() + tail
}

// A lane group is `$vectors` registers of `$vector_lanes` lanes each, so
// `$width = $vectors * $vector_lanes` centroids per group.
macro_rules! simd_kernel {
    ($kernel:ident, $elem:ty, $vector:ty, $vector_lanes:expr, $vectors:expr, $width:expr, $sum_groups:expr, $name:expr) => {
        impl BatchKernel<$elem> for $kernel {
            const LANES: usize = $width;
            type Packed = Vec<[$vector; $vectors]>;

            fn name(&self) -> &'static str {
                $name
            }

            fn pack(&self, centroids: &[$elem]) -> Vec<[$vector; $vectors]> {
                centroids
                    .chunks($width)
                    .map(|chunk| {
                        let mut lanes = [<$elem>::INFINITY; $width];
                        lanes[..chunk.len()].copy_from_slice(chunk);
                        let group: [$vector; $vectors] = std::array::from_fn(|v| {
                            let mut part = [<$elem>::INFINITY; $vector_lanes];
                            part.copy_from_slice(
                                &lanes[v * $vector_lanes..(v + 1) * $vector_lanes],
                            );
                            <$vector>::from(part)
                        });
                        group
                    })
                    .collect()
            }

            #[inline]
            fn nearest(&self, packed: &Vec<[$vector; $vectors]>, sample: $elem) -> usize {
                let x = <$vector>::splat(sample);
                let mut best_c = 0;
                let mut best_dist = <$elem>::INFINITY;

                for (g, group) in packed.iter().enumerate() {
                    let mut dist = [<$elem>::INFINITY; $width];
                    for (v, vector) in group.iter().enumerate() {
                        dist[v * $vector_lanes..(v + 1) * $vector_lanes]
                            .copy_from_slice(&(x - *vector).abs().to_array());
                    }

                    // Reduce the group to (min, lane), left to right.
                    let mut lane = 0;
                    let mut group_min = dist[0];
                    for (j, &d) in dist.iter().enumerate().skip(1) {
                        if d < group_min {
                            group_min = d;
                            lane = j;
                        }
                    }

                    // Across groups with the same strict rule, so an equal
                    // distance in a later group never displaces an earlier one.
                    if group_min < best_dist {
                        best_dist = group_min;
                        best_c = g * $width + lane;
                    }
                }
                best_c
            }

            fn gather_sum(&self, samples: &[$elem], members: &[usize]) -> f64 {
                gather_sum_f64x4::<$elem, $sum_groups>(samples, members)
            }
        }
    };
}

simd_kernel!(Simd4Kernel, f32, f32x4, 4, 1, 4, 1, "simd4");
simd_kernel!(Simd8Kernel, f32, f32x8, 8, 1, 8, 2, "simd8");
simd_kernel!(Simd4Kernel, f64, f64x4, 4, 1, 4, 1, "simd4");
simd_kernel!(Simd8Kernel, f64, f64x4, 4, 2, 8, 2, "simd8");

/// Kernel requested by the caller. `Auto` is resolved once per run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelChoice {
    Scalar,
    Simd4,
    Simd8,
    #[default]
    Auto,
}

impl KernelChoice {
    /// Replaces `Auto` with a concrete kernel for the running CPU.
    pub fn resolve(self) -> KernelChoice {
        match self {
            KernelChoice::Auto => {
                if has_wide_vectors() {
                    KernelChoice::Simd8
                } else {
                    KernelChoice::Simd4
                }
            }
            other => other,
        }
    }

    pub fn lanes(self) -> usize {
        match self.resolve() {
            KernelChoice::Scalar => 1,
            KernelChoice::Simd4 => 4,
            _ => 8,
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn has_wide_vectors() -> bool {
    std::is_x86_feature_detected!("avx")
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn has_wide_vectors() -> bool {
    false
}
