use crate::config::ImageConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic synthetic grayscale image: a diagonal gradient with a few
/// bright and dark discs and some per-pixel noise, so every run clusters the
/// same non-trivial histogram.
pub fn generate_image(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);

    let discs: Vec<(f32, f32, f32, f32)> = (0..6)
        .map(|_| {
            (
                rng.gen_range(0.0..width as f32),
                rng.gen_range(0.0..height as f32),
                rng.gen_range(0.05..0.2) * width.min(height) as f32,
                if rng.gen_bool(0.5) { 235.0 } else { 25.0 },
            )
        })
        .collect();

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let (fx, fy) = (x as f32, y as f32);
            let mut value = 255.0 * (fx + fy) / (width + height) as f32;
            for &(cx, cy, r, level) in &discs {
                if (fx - cx).powi(2) + (fy - cy).powi(2) <= r * r {
                    value = level;
                }
            }
            value += rng.gen_range(-8.0..8.0);
            pixels.push(value.clamp(0.0, 255.0) as u8);
        }
    }
    pixels
}

/// Loads raw pixels from disk, or generates the synthetic image.
pub fn load_image(cfg: &ImageConfig, seed: u64) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let Some(path) = &cfg.raw_path else {
        eprintln!(
            "Generating {}x{} synthetic image with seed {}...",
            cfg.width, cfg.height, seed
        );
        return Ok(generate_image(cfg.width, cfg.height, seed));
    };

    eprintln!("Loading raw pixels from {:?}", path);
    let pixels = std::fs::read(path)?;
    if pixels.len() != cfg.width * cfg.height {
        return Err(format!(
            "{:?} holds {} bytes, expected {}x{} = {}",
            path,
            pixels.len(),
            cfg.width,
            cfg.height,
            cfg.width * cfg.height
        )
        .into());
    }
    Ok(pixels)
}
