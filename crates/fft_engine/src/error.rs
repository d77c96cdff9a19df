/// Errors reported at the boundary of the frequency-domain engine.
#[derive(Clone, PartialEq, Eq)]
pub enum FftError {
    /// The raster has zero width or zero height.
    EmptyImage,
    /// Only single-channel rasters can be transformed.
    UnsupportedChannels(usize),
    /// The sample buffer does not match `width * height * channels`.
    BufferSize { expected: usize, actual: usize },
    /// Frequency matrices must have power-of-two dimensions.
    NotPowerOfTwo { width: usize, height: usize },
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyImage => "Image has no pixels".fmt(f),
            Self::UnsupportedChannels(channels) => write!(
                f,
                "FFT requires a single-channel image, got {} channels",
                channels
            ),
            Self::BufferSize { expected, actual } => write!(
                f,
                "Sample buffer holds {} values, expected {}",
                actual, expected
            ),
            Self::NotPowerOfTwo { width, height } => write!(
                f,
                "Matrix dimensions {}x{} are not powers of two",
                width, height
            ),
        }
    }
}

impl core::fmt::Debug for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self, f)
    }
}

impl std::error::Error for FftError {}
