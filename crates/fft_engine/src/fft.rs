// One-dimensional radix-2 FFT on slices of complex values.

use std::f64::consts::PI;

use crate::Complex;

/// In-place forward FFT using the iterative Cooley-Tukey scheme: a
/// bit-reversal permutation followed by Danielson-Lanczos butterfly passes.
///
/// Each butterfly at sub-transform length `len` uses the twiddle factor
/// `exp(-2*pi*i*k/len)`. The factors are computed once per call into a
/// table of `n/2` entries, and a stage of length `len` reads it with
/// stride `n/len`.
///
/// __Arguments:__
///
/// + `buffer` - the sequence to transform; its length must be a power of
///   two (lengths 0 and 1 are left unchanged).
///
pub fn fft(buffer: &mut [Complex]) {
    let n = buffer.len();
    if n <= 1 {
        return;
    }
    debug_assert!(
        n.is_power_of_two(),
        "FFT routine is only implemented for arrays with length a power of 2."
    );

    // Bit reversal portion:
    //
    //  Swap each entry with the entry whose index has the reversed binary
    //  representation. `j` tracks the reversed counterpart of `i`.

    let mut j: usize = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;

        if i < j {
            buffer.swap(i, j);
        }
    }

    // Danielson-Lanczos iteration:
    //
    //  Combine pairs of sub-transforms of length `half` into transforms of
    //  length `len`, doubling until the whole buffer is one transform.

    let twiddles: Vec<Complex> = (0..n / 2)
        .map(|k| Complex::from_angle(-2.0 * PI * k as f64 / n as f64))
        .collect();

    let mut len: usize = 2;
    while len <= n {
        let half = len >> 1;
        let stride = n / len;

        for start in (0..n).step_by(len) {
            for k in 0..half {
                let even = buffer[start + k];
                let t = twiddles[k * stride] * buffer[start + k + half];

                buffer[start + k] = even + t;
                buffer[start + k + half] = even - t;
            }
        }

        len <<= 1;
    }
}

/// In-place inverse FFT, computed as `conj(fft(conj(x))) / n`.
///
/// The 1/n normalizing factor is applied here, so `ifft(fft(x)) == x` up to
/// rounding.
pub fn ifft(buffer: &mut [Complex]) {
    let n = buffer.len() as f64;

    for value in buffer.iter_mut() {
        *value = value.conj();
    }

    fft(buffer);

    for value in buffer.iter_mut() {
        *value = Complex::new(value.re / n, -value.im / n);
    }
}
