// Frequency-domain stage of the pipeline: forward FFT of the grayscale
// image, optional spectrum and round-trip outputs, the filter bank, and the
// inverse FFT back to an image of the original size.

use fft_engine::{FrequencyMatrix, Notch, forward, inverse, render_spectrum};

use crate::{ImageProcessor, save_raster};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emphasis {
    pub radius: usize,
    pub k_low: f64,
    pub k_high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoNotch {
    pub radius: usize,
    pub threshold_factor: f64,
}

/// What the frequency stage should do; everything is off by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyOptions {
    /// Write the inverse of the unfiltered transform here.
    pub test_fft_path: Option<String>,
    /// Write the centered log-magnitude spectrum here.
    pub spectrum_path: Option<String>,
    pub lowpass_radius: Option<usize>,
    pub highpass_radius: Option<usize>,
    pub emphasis: Option<Emphasis>,
    pub notches: Vec<Notch>,
    pub auto_notch: Option<AutoNotch>,
}

impl FrequencyOptions {
    /// True when the stage has any work to do.
    pub fn is_requested(&self) -> bool {
        self.test_fft_path.is_some() || self.spectrum_path.is_some() || self.has_filters()
    }

    /// True when the image itself will be replaced by a filtered version.
    pub fn has_filters(&self) -> bool {
        self.lowpass_radius.is_some()
            || self.highpass_radius.is_some()
            || self.emphasis.is_some()
            || !self.notches.is_empty()
            || self.auto_notch.is_some()
    }
}

pub fn fft_image(image_proc: &mut ImageProcessor, options: &FrequencyOptions) -> Result<(), String> {
    let (width, height) = image_proc.dimensions();

    log::info!("Performing FFT on {}x{} image.", width, height);

    let mut matrix = forward(&image_proc.image).map_err(|e| format!("FFT failed: {}", e))?;

    log::info!(
        "FFT computed ({}x{} after padding).",
        matrix.width(),
        matrix.height()
    );

    if let Some(path) = &options.test_fft_path {
        log::info!("Testing inverse FFT.");
        let round_trip = inverse(matrix.clone()).crop(width, height);
        save_raster(&round_trip, path)?;
    }

    if let Some(path) = &options.spectrum_path {
        log::info!("Rendering Fourier spectrum.");
        save_raster(&render_spectrum(&matrix), path)?;
    }

    if !options.has_filters() {
        return Ok(());
    }

    apply_filters(&mut matrix, options);

    log::info!("Performing inverse FFT.");
    image_proc.image = inverse(matrix).crop(width, height);

    Ok(())
}

/// Filters run in a fixed order: lowpass, highpass, emphasis, explicit
/// notches, then auto-notch.
fn apply_filters(matrix: &mut FrequencyMatrix, options: &FrequencyOptions) {
    if let Some(radius) = options.lowpass_radius {
        log::info!("Applying frequency lowpass filter (radius={}).", radius);
        matrix.lowpass(radius);
    }

    if let Some(radius) = options.highpass_radius {
        log::info!("Applying frequency highpass filter (radius={}).", radius);
        matrix.highpass(radius);
    }

    if let Some(Emphasis {
        radius,
        k_low,
        k_high,
    }) = options.emphasis
    {
        log::info!(
            "Applying frequency emphasis (radius={}, low={:.1}, high={:.1}).",
            radius,
            k_low,
            k_high
        );
        matrix.emphasis(radius, k_low, k_high);
    }

    for &notch in &options.notches {
        log::info!(
            "Applying notch at ({}, {}) with radius {}.",
            notch.u,
            notch.v,
            notch.radius
        );
        matrix.notch(notch);
    }

    if let Some(AutoNotch {
        radius,
        threshold_factor,
    }) = options.auto_notch
    {
        log::info!(
            "Detecting periodic noise (radius={}, factor={:.1}).",
            radius,
            threshold_factor
        );
        let pairs = matrix.auto_notch(threshold_factor, radius);
        if pairs == 0 {
            log::warn!("No noise peaks found above the threshold.");
        } else {
            log::info!("Suppressed {} noise peak pair(s).", pairs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_raster;
    use fft_engine::Raster;

    fn processor(image: Raster) -> ImageProcessor {
        ImageProcessor::new(image, "unused.pgm", 2).unwrap()
    }

    /// 5x3 image of alternating 0 and 200.
    fn stripes() -> Raster {
        let data = (0..15).map(|i| if i % 2 == 0 { 200 } else { 0 }).collect();
        Raster::from_gray(5, 3, data)
    }

    #[test]
    fn no_filters_leaves_image_untouched() {
        let mut image_proc = processor(stripes());

        fft_image(&mut image_proc, &FrequencyOptions::default()).unwrap();

        assert_eq!(image_proc.image, stripes());
    }

    #[test]
    fn filtered_image_is_cropped_to_original_size() {
        let mut image_proc = processor(stripes());
        let options = FrequencyOptions {
            lowpass_radius: Some(100),
            ..Default::default()
        };

        fft_image(&mut image_proc, &options).unwrap();

        // a lowpass wider than the matrix keeps everything
        assert_eq!(image_proc.image, stripes());
    }

    #[test]
    fn highpass_at_zero_removes_mean() {
        let mut image_proc = processor(Raster::from_gray(4, 4, vec![77; 16]));
        let options = FrequencyOptions {
            highpass_radius: Some(0),
            ..Default::default()
        };

        fft_image(&mut image_proc, &options).unwrap();

        assert_eq!(image_proc.image.data, vec![0; 16]);
    }

    #[test]
    fn writes_spectrum_and_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let spectrum_path = dir.path().join("spectrum.pgm");
        let test_path = dir.path().join("round_trip.pgm");

        let mut image_proc = processor(stripes());
        let options = FrequencyOptions {
            spectrum_path: Some(spectrum_path.to_str().unwrap().to_string()),
            test_fft_path: Some(test_path.to_str().unwrap().to_string()),
            ..Default::default()
        };
        assert!(options.is_requested());
        assert!(!options.has_filters());

        fft_image(&mut image_proc, &options).unwrap();

        let spectrum = load_raster(spectrum_path.to_str().unwrap()).unwrap();
        assert_eq!((spectrum.width, spectrum.height), (8, 4));
        assert_eq!(spectrum.data.iter().max(), Some(&255));

        let round_trip = load_raster(test_path.to_str().unwrap()).unwrap();
        assert_eq!(round_trip, stripes());
    }

    #[test]
    fn rgb_images_are_rejected() {
        let mut image_proc = processor(Raster::new(4, 4, 3));
        let options = FrequencyOptions {
            lowpass_radius: Some(2),
            ..Default::default()
        };

        assert!(fft_image(&mut image_proc, &options).is_err());
        assert_eq!(image_proc.image, Raster::new(4, 4, 3));
    }

    #[test]
    fn notch_and_auto_notch_run_in_sequence() {
        let mut image_proc = processor(Raster::from_gray(8, 8, vec![100; 64]));
        let options = FrequencyOptions {
            notches: vec![Notch::new(2, 1, 1)],
            auto_notch: Some(AutoNotch {
                radius: 1,
                threshold_factor: 10.0,
            }),
            ..Default::default()
        };

        fft_image(&mut image_proc, &options).unwrap();

        // a constant image has no energy away from DC
        assert_eq!(image_proc.image.data, vec![100; 64]);
    }
}
