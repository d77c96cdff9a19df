// Storage for the frequency-domain representation of an image.

use std::ops::{Index, IndexMut};

use crate::{Complex, FftError};

/// A `height` x `width` grid of complex coefficients held in one contiguous
/// row-major buffer. Both dimensions are powers of two and never change
/// after construction.
///
/// Coefficients are stored unshifted: the zero frequency sits at `(0, 0)`
/// and, by periodicity, next to all four corners.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyMatrix {
    data: Vec<Complex>,
    width: usize,
    height: usize,
}

impl FrequencyMatrix {
    pub(crate) fn zeros(width: usize, height: usize) -> Self {
        Self {
            data: vec![Complex::ZERO; width * height],
            width,
            height,
        }
    }

    /// Wrap an existing row-major buffer of coefficients.
    pub fn from_data(width: usize, height: usize, data: Vec<Complex>) -> Result<Self, FftError> {
        if !width.is_power_of_two() || !height.is_power_of_two() {
            return Err(FftError::NotPowerOfTwo { width, height });
        }
        if data.len() != width * height {
            return Err(FftError::BufferSize {
                expected: width * height,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[Complex] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [Complex] {
        &mut self.data
    }

    /// Coefficient at a frequency given relative to the spectrum center,
    /// i.e. as it appears in the quadrant-shifted view.
    pub fn at_frequency(&self, u: isize, v: isize) -> Complex {
        self[self.storage_index(u, v)]
    }

    /// `(row, col)` holding the center-relative frequency `(u, v)`.
    pub fn storage_index(&self, u: isize, v: isize) -> (usize, usize) {
        let row = v.rem_euclid(self.height as isize) as usize;
        let col = u.rem_euclid(self.width as isize) as usize;
        (row, col)
    }

    /// Center-relative frequency `(u, v)` of the entry at `(row, col)`,
    /// with `u` in `[-width/2, width/2)` and `v` likewise.
    pub fn signed_frequency(&self, row: usize, col: usize) -> (isize, isize) {
        (
            signed_offset(col, self.width),
            signed_offset(row, self.height),
        )
    }

    /// Squared distance of `(row, col)` from the zero frequency, taking the
    /// nearest of the four corners.
    pub(crate) fn quadrant_distance_sqr(&self, row: usize, col: usize) -> f64 {
        let dx = col.min(self.width - col) as f64;
        let dy = row.min(self.height - row) as f64;
        dx * dx + dy * dy
    }
}

fn signed_offset(index: usize, len: usize) -> isize {
    ((index + len / 2) % len) as isize - (len / 2) as isize
}

impl Index<(usize, usize)> for FrequencyMatrix {
    type Output = Complex;
    // index is (row, column)
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index.0 * self.width + index.1]
    }
}

impl IndexMut<(usize, usize)> for FrequencyMatrix {
    // index is (row, column)
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.data[index.0 * self.width + index.1]
    }
}
