// Visualization of a frequency matrix as a grayscale image.

use crate::{FrequencyMatrix, Raster};

/// Render the log-magnitude spectrum, `log(1 + |F(u, v)|)`, with the zero
/// frequency moved to the image center and values scaled so the largest
/// maps to 255. An all-zero spectrum renders as an all-zero image.
pub fn render_spectrum(matrix: &FrequencyMatrix) -> Raster {
    let width = matrix.width();
    let height = matrix.height();

    let mut shifted = vec![0.0_f64; width * height];
    let mut max_magnitude = 0.0_f64;

    for y in 0..height {
        for x in 0..width {
            let magnitude = matrix[(y, x)].magnitude().ln_1p();

            // move origin to image center
            let y_shifted = (y + height / 2) % height;
            let x_shifted = (x + width / 2) % width;
            shifted[y_shifted * width + x_shifted] = magnitude;

            max_magnitude = max_magnitude.max(magnitude);
        }
    }

    let mut image = Raster::new(width, height, 1);
    if max_magnitude > 0.0 {
        for (pixel, magnitude) in image.data.iter_mut().zip(&shifted) {
            *pixel = (magnitude / max_magnitude * 255.0) as u8;
        }
    }

    image
}
