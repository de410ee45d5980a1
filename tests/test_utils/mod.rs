use gray_kmeans::{ClusterSet, Element};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Horizontal gradient image, `width * height` bytes in raster order.
#[allow(dead_code)]
pub fn create_gradient_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height);
    for _ in 0..height {
        for x in 0..width {
            pixels.push(((x * 255) / (width.max(2) - 1)) as u8);
        }
    }
    pixels
}

/// Deterministic random 8-bit pixels (for reproducibility).
#[allow(dead_code)]
pub fn create_random_pixels(n: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen::<u8>()).collect()
}

/// Pixels drawn around a few intensity bands, with a little noise.
#[allow(dead_code)]
pub fn create_banded_pixels(bands: &[u8], per_band: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pixels = Vec::with_capacity(bands.len() * per_band);
    for &band in bands {
        for _ in 0..per_band {
            let noise: i16 = rng.gen_range(-3..=3);
            pixels.push((band as i16 + noise).clamp(0, 255) as u8);
        }
    }
    pixels
}

/// Random normalized samples.
#[allow(dead_code)]
pub fn create_random_samples(n: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen::<f32>()).collect()
}

/// Random normalized samples at double precision.
#[allow(dead_code)]
pub fn create_random_samples_f64(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

/// Centroids drawn from a small set of dyadic values so that exact
/// distance ties are common.
#[allow(dead_code)]
pub fn create_tie_prone_centroids(k: usize, seed: u64) -> Vec<f32> {
    const LEVELS: [f32; 9] = [0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0];
    let mut rng = StdRng::seed_from_u64(seed);
    (0..k).map(|_| LEVELS[rng.gen_range(0..LEVELS.len())]).collect()
}

/// Reference argmin: first index with the smallest `|x - c|`.
#[allow(dead_code)]
pub fn brute_force_nearest<T: Element>(x: T, centroids: &[T]) -> usize {
    let mut best = 0;
    for (c, &centroid) in centroids.iter().enumerate() {
        if (x - centroid).abs() < (x - centroids[best]).abs() {
            best = c;
        }
    }
    best
}

/// True when the member lists hold every index in `0..n` exactly once.
#[allow(dead_code)]
pub fn is_partition<T: Element>(clusters: &ClusterSet<T>, n: usize) -> bool {
    let mut seen = vec![false; n];
    for cluster in clusters.clusters() {
        for &i in cluster.members() {
            if i >= n || seen[i] {
                return false;
            }
            seen[i] = true;
        }
    }
    seen.into_iter().all(|s| s)
}

/// Cluster index of every sample, read back from the member lists.
#[allow(dead_code)]
pub fn labels_from_members<T: Element>(clusters: &ClusterSet<T>, n: usize) -> Vec<usize> {
    let mut labels = vec![usize::MAX; n];
    for (c, cluster) in clusters.clusters().enumerate() {
        for &i in cluster.members() {
            labels[i] = c;
        }
    }
    labels
}

/// Relative comparison for centroid values.
#[allow(dead_code)]
pub fn approx_eq_rel(a: f32, b: f32, tol: f32) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= tol * scale
}

/// Relative comparison at double precision.
#[allow(dead_code)]
pub fn approx_eq_rel_f64(a: f64, b: f64, tol: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= tol * scale
}

#[allow(dead_code)]
pub fn mean(values: &[f32]) -> f32 {
    (values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64) as f32
}
