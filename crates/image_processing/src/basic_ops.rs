// Basic image operations: grayscale, resize and pointwise transforms.

use fft_engine::Raster;
use image::{ImageBuffer, Luma, Pixel, Rgb, imageops::FilterType};
use rayon::prelude::*;

use crate::ImageProcessor;

fn pixel_to_grayscale(p: &[u8]) -> u8 {
    ((p[0] as f64 * 0.299) + (p[1] as f64 * 0.587) + (p[2] as f64 * 0.114)) as u8
}

/// Convert an RGB image to a single-channel grayscale image. Grayscale
/// images are left as they are.
pub fn to_grayscale(image_proc: &mut ImageProcessor) {
    let image = &image_proc.image;
    if image.channels == 1 {
        log::warn!("Image is already grayscale");
        return;
    }

    log::info!("Converting image to grayscale...");

    let data = image
        .data
        .chunks_exact(image.channels)
        .map(pixel_to_grayscale)
        .collect();

    image_proc.image = Raster::from_gray(image.width, image.height, data);
}

/// Use the image crate to resize the image; `bilinear` selects a triangle
/// filter, otherwise nearest neighbour sampling is used.
pub fn resize(
    image_proc: &mut ImageProcessor,
    new_width: u32,
    new_height: u32,
    bilinear: bool,
) -> Result<(), String> {
    if new_width == 0 || new_height == 0 {
        return Err(format!("Invalid resize target {}x{}", new_width, new_height));
    }

    let resize_filter = if bilinear {
        FilterType::Triangle
    } else {
        FilterType::Nearest
    };

    log::info!(
        "Resizing image from {:?} to ({}, {}) with {:?} filter...",
        image_proc.dimensions(),
        new_width,
        new_height,
        resize_filter
    );

    let image = &image_proc.image;
    let data = match image.channels {
        1 => resize_buffer::<Luma<u8>>(image, new_width, new_height, resize_filter)?,
        3 => resize_buffer::<Rgb<u8>>(image, new_width, new_height, resize_filter)?,
        n => return Err(format!("Cannot resize image with {} channels", n)),
    };

    image_proc.image = Raster {
        width: new_width as usize,
        height: new_height as usize,
        channels: image.channels,
        data,
    };

    Ok(())
}

fn resize_buffer<P: Pixel<Subpixel = u8> + 'static>(
    image: &Raster,
    new_width: u32,
    new_height: u32,
    filter: FilterType,
) -> Result<Vec<u8>, String> {
    let buffer = ImageBuffer::<P, Vec<u8>>::from_raw(
        image.width as u32,
        image.height as u32,
        image.data.clone(),
    )
    .ok_or("Image buffer does not match its dimensions")?;

    Ok(image::imageops::resize(&buffer, new_width, new_height, filter).into_raw())
}

/// Apply `f` to every sample of every channel, in parallel.
fn map_samples(image_proc: &mut ImageProcessor, f: impl Fn(u8) -> u8 + Sync) {
    let data = &mut image_proc.image.data;
    image_proc
        .thread_pool
        .install(|| data.par_iter_mut().for_each(|v| *v = f(*v)));
}

/// `v -> gain * v + bias`, saturated to `[0, 255]`.
pub fn linear_transform(image_proc: &mut ImageProcessor, gain: f64, bias: f64) {
    log::info!("Applying linear transform (gain={}, bias={})...", gain, bias);
    map_samples(image_proc, |v| (gain * v as f64 + bias).round().clamp(0.0, 255.0) as u8);
}

/// `v -> 255 * (v / 255)^(1 / gamma)`
pub fn gamma_correction(image_proc: &mut ImageProcessor, gamma: f64) -> Result<(), String> {
    if gamma <= 0.0 {
        return Err(format!("Gamma must be positive, got {}", gamma));
    }

    log::info!("Applying gamma correction (gamma={})...", gamma);

    let exponent = 1.0 / gamma;
    let lut: Vec<u8> = (0..=255u8)
        .map(|v| (255.0 * (v as f64 / 255.0).powf(exponent)).round() as u8)
        .collect();

    map_samples(image_proc, |v| lut[v as usize]);
    Ok(())
}

pub fn invert(image_proc: &mut ImageProcessor) {
    log::info!("Inverting image...");
    map_samples(image_proc, |v| 255 - v);
}

/// Samples above `threshold` become 255, all others 0.
pub fn threshold(image_proc: &mut ImageProcessor, threshold: u8) {
    log::info!("Applying threshold {}...", threshold);
    map_samples(image_proc, |v| if v > threshold { 255 } else { 0 });
}
