// Code for implementing 3x3 convolution filters on images.
//
// Pixels outside the image are treated as copies of the nearest border
// pixel, so every output pixel uses the same kernel.

use fft_engine::Raster;
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::ImageProcessor;

pub struct Kernel3X3 {
    m: [[f32; 3]; 3],
}

impl Kernel3X3 {
    pub fn sobel_x() -> Self {
        Self {
            m: [
                [-1.0, 0.0, 1.0], //
                [-2.0, 0.0, 2.0], //
                [-1.0, 0.0, 1.0], //
            ],
        }
    }

    pub fn sobel_y() -> Self {
        Self {
            m: [
                [-1.0, -2.0, -1.0], //
                [0.0, 0.0, 0.0],    //
                [1.0, 2.0, 1.0],    //
            ],
        }
    }

    pub fn box_blur() -> Self {
        Self {
            m: [[1.0 / 9.0; 3]; 3],
        }
    }

    pub fn sharpen() -> Self {
        Self {
            m: [
                [0.0, -1.0, 0.0],  //
                [-1.0, 5.0, -1.0], //
                [0.0, -1.0, 0.0],  //
            ],
        }
    }

    /// Weighted sum of the 3x3 neighbourhood of `(x, y)` in one channel.
    fn apply(&self, image: &Raster, x: usize, y: usize, chan: usize) -> f32 {
        let mut sum = 0.0;
        for (ky, row) in self.m.iter().enumerate() {
            for (kx, weight) in row.iter().enumerate() {
                let sx = (x + kx).saturating_sub(1).min(image.width - 1);
                let sy = (y + ky).saturating_sub(1).min(image.height - 1);
                sum += weight * image.sample(sx, sy, chan) as f32;
            }
        }
        sum
    }
}

/// Replace every sample with `op(image, x, y, channel)`. Rows of the output
/// are computed in parallel on the processor's thread pool.
fn filter_image(
    image_proc: &mut ImageProcessor,
    op: impl Fn(&Raster, usize, usize, usize) -> u8 + Sync,
) {
    let image = &image_proc.image;
    if image.data.is_empty() {
        return;
    }
    let row_size = image.width * image.channels;
    let mut out = vec![0u8; image.data.len()];

    image_proc.thread_pool.install(|| {
        out.par_chunks_mut(row_size)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..image.width {
                    for chan in 0..image.channels {
                        row[x * image.channels + chan] = op(image, x, y, chan);
                    }
                }
            })
    });

    image_proc.image.data = out;
}

pub fn convolve_3x3(image_proc: &mut ImageProcessor, kernel: &Kernel3X3) {
    filter_image(image_proc, |image, x, y, chan| {
        kernel.apply(image, x, y, chan).round().clamp(0.0, 255.0) as u8
    });
}

pub fn box_blur(image_proc: &mut ImageProcessor) {
    log::info!("Applying 3x3 box blur...");
    convolve_3x3(image_proc, &Kernel3X3::box_blur());
}

pub fn sharpen(image_proc: &mut ImageProcessor) {
    log::info!("Applying sharpen filter...");
    convolve_3x3(image_proc, &Kernel3X3::sharpen());
}

/// Gradient magnitude `sqrt(gx^2 + gy^2)` from the two Sobel kernels.
pub fn sobel(image_proc: &mut ImageProcessor) {
    log::info!("Applying Sobel filter...");

    let kernel_x = Kernel3X3::sobel_x();
    let kernel_y = Kernel3X3::sobel_y();

    filter_image(image_proc, |image, x, y, chan| {
        let o_x = kernel_x.apply(image, x, y, chan);
        let o_y = kernel_y.apply(image, x, y, chan);
        (o_x.powi(2) + o_y.powi(2)).sqrt().clamp(0.0, 255.0) as u8
    });
}
