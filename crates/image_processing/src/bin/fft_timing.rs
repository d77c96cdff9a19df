//! Times the forward and inverse 2D FFT on a synthetic image.

use std::time::Instant;

use fft_engine::{Raster, forward, inverse};

/// Deliberately not a power of two, so padding is part of the measurement.
const WIDTH: usize = 3000;
const HEIGHT: usize = 2000;

fn main() -> Result<(), String> {
    env_logger::init();

    let data = (0..WIDTH * HEIGHT)
        .map(|i| ((i % WIDTH) ^ (i / WIDTH)) as u8)
        .collect();
    let image = Raster::from_gray(WIDTH, HEIGHT, data);

    let start = Instant::now();
    let matrix = forward(&image).map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();
    log::info!(
        "Forward FFT of {}x{} image ({}x{} padded): {:?}",
        WIDTH,
        HEIGHT,
        matrix.width(),
        matrix.height(),
        elapsed
    );

    let start = Instant::now();
    let restored = inverse(matrix).crop(WIDTH, HEIGHT);
    let elapsed = start.elapsed();
    log::info!("Inverse FFT: {:?}", elapsed);

    let max_error = restored
        .data
        .iter()
        .zip(&image.data)
        .map(|(a, b)| (*a as i16 - *b as i16).abs())
        .max()
        .unwrap_or(0);
    log::info!("Max round-trip error: {}", max_error);

    Ok(())
}

// Run with logging enabled to see the timings:
//  RUST_LOG=info cargo run --release --bin fft_timing
