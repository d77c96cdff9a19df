//! Frequency-domain processing of grayscale images.
//!
//! A raster goes through [`forward`] to become a [`FrequencyMatrix`], which
//! can be rendered with [`render_spectrum`] or reshaped by the filters on
//! the matrix (`lowpass`, `highpass`, `notch`, `auto_notch`, `emphasis`),
//! and comes back with [`inverse`].

#[cfg(test)]
mod tests;

mod complex;
mod error;
mod fft;
mod filters;
mod matrix;
mod raster;
mod spectrum;
mod transform;

pub use complex::Complex;
pub use error::FftError;
pub use fft::{fft, ifft};
pub use filters::Notch;
pub use matrix::FrequencyMatrix;
pub use raster::Raster;
pub use spectrum::render_spectrum;
pub use transform::{forward, inverse};
