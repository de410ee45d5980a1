use gray_kmeans::{KernelChoice, SampleBuffer, Segmenter, SegmenterConfig};
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

const WIDTH: usize = 640;
const HEIGHT: usize = 480;

/// Horizontal gradient with a bright square and a dark bar painted on top.
fn synthetic_image() -> Vec<u8> {
    let mut pixels = Vec::with_capacity(WIDTH * HEIGHT);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let value = if (200..360).contains(&x) && (140..300).contains(&y) {
                230
            } else if (400..600).contains(&y) && x < 120 {
                15
            } else {
                (255 * x / (WIDTH - 1)) as u8
            };
            pixels.push(value);
        }
    }
    pixels
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: segment [k] [output.json]
    let mut args = std::env::args().skip(1);
    let k: usize = args
        .next()
        .map(|arg| arg.parse::<usize>())
        .transpose()?
        .unwrap_or(4);
    let json_path = args.next();

    println!("Segmenting a {}x{} synthetic image into {} levels.", WIDTH, HEIGHT, k);
    let pixels = synthetic_image();
    let samples = SampleBuffer::<f32>::from_gray_bytes(&pixels)?;

    for kernel in [
        KernelChoice::Scalar,
        KernelChoice::Simd4,
        KernelChoice::Simd8,
        KernelChoice::Auto,
    ] {
        let segmenter = Segmenter::new(SegmenterConfig::new(k).with_kernel(kernel))?;

        let start = Instant::now();
        let result = segmenter.segment(&samples)?;
        let elapsed = start.elapsed();

        println!("\n=== {:?} (ran {}) ===", kernel, result.kernel);
        println!(
            "  {} iterations, {:?}, final delta {:.2e}, {:.2} ms",
            result.iterations,
            result.state,
            result.final_delta,
            elapsed.as_secs_f64() * 1000.0
        );
        for (c, cluster) in result.clusters.clusters().enumerate() {
            println!(
                "  cluster {:>2}: centroid {:.4} -> level {:>3}, {} pixels",
                c,
                cluster.centroid,
                (cluster.centroid * segmenter.config().output_scale) as u8,
                cluster.count()
            );
        }
    }

    let segmenter = Segmenter::new(SegmenterConfig::new(k))?;
    let double = segmenter.segment_bytes_f64(&pixels)?;
    println!(
        "\n=== double precision ({}) ===\n  {} iterations, centroids {:?}",
        double.kernel, double.iterations, double.centroids
    );

    if let Some(path) = json_path {
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(writer, &double)?;
        println!("Wrote double-precision segmentation to {}", path);
    }

    Ok(())
}
