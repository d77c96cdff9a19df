// 2D FFT of grayscale rasters, built from the 1D kernel by row/column
// decomposition.

use log::debug;

use crate::{Complex, FftError, FrequencyMatrix, Raster, fft, ifft};

/// Forward 2D FFT of a single-channel raster.
///
/// The raster is zero-padded up to the next power of two in each dimension,
/// so a 5x3 image yields an 8x4 matrix. Input is validated before anything
/// is allocated.
pub fn forward(image: &Raster) -> Result<FrequencyMatrix, FftError> {
    if image.width == 0 || image.height == 0 || image.data.is_empty() {
        return Err(FftError::EmptyImage);
    }
    if image.channels != 1 {
        return Err(FftError::UnsupportedChannels(image.channels));
    }
    let expected = image.width * image.height;
    if image.data.len() != expected {
        return Err(FftError::BufferSize {
            expected,
            actual: image.data.len(),
        });
    }

    let width = image.width.next_power_of_two();
    let height = image.height.next_power_of_two();
    debug!(
        "Padding {}x{} image to {}x{} for FFT",
        image.width, image.height, width, height
    );

    let mut matrix = FrequencyMatrix::zeros(width, height);

    // pixel intensities go in the real parts; padding stays zero
    for (y, row) in image.data.chunks_exact(image.width).enumerate() {
        for (x, &pixel) in row.iter().enumerate() {
            matrix[(y, x)] = Complex::from(pixel as f64);
        }
    }

    fft_2d(&mut matrix, false);

    Ok(matrix)
}

/// Inverse 2D FFT, consuming the matrix.
///
/// Real parts are rounded and clamped to `[0, 255]`; imaginary residue is
/// discarded. The output has the padded dimensions of the matrix, callers
/// crop it back with [`Raster::crop`] if needed.
pub fn inverse(mut matrix: FrequencyMatrix) -> Raster {
    fft_2d(&mut matrix, true);

    let mut image = Raster::new(matrix.width(), matrix.height(), 1);
    for (pixel, value) in image.data.iter_mut().zip(matrix.data()) {
        *pixel = value.re.round().clamp(0.0, 255.0) as u8;
    }

    image
}

/// Applies the 1D transform to every row, then to every column through a
/// single column buffer. The inverse uses the same order.
fn fft_2d(matrix: &mut FrequencyMatrix, inverse: bool) {
    let width = matrix.width();
    let height = matrix.height();

    let kernel: fn(&mut [Complex]) = if inverse { ifft } else { fft };

    // row-wise fft
    for row in matrix.data_mut().chunks_exact_mut(width) {
        kernel(row);
    }

    // column-wise fft
    let mut column = vec![Complex::ZERO; height];
    for x in 0..width {
        for (y, value) in column.iter_mut().enumerate() {
            *value = matrix[(y, x)];
        }

        kernel(&mut column);

        for (y, value) in column.iter().enumerate() {
            matrix[(y, x)] = *value;
        }
    }
}
