// unit tests


use super::*;
use proptest::prelude::*;
use std::f64::consts::PI;

const EPSILON: f64 = 1e-9;

fn assert_close(a: Complex, b: Complex) {
    assert!(
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON,
        "{:?} != {:?}",
        a,
        b
    );
}

/// O(n^2) DFT to check the fast transform against.
fn naive_dft(input: &[Complex]) -> Vec<Complex> {
    let n = input.len();
    (0..n)
        .map(|k| {
            input
                .iter()
                .enumerate()
                .fold(Complex::ZERO, |acc, (j, &x)| {
                    acc + x * Complex::from_angle(-2.0 * PI * (k * j) as f64 / n as f64)
                })
        })
        .collect()
}

#[test]
fn complex_arithmetic() {
    let a = Complex::new(1.0, 2.0);
    let b = Complex::new(3.0, -1.0);

    assert_eq!(a + b, Complex::new(4.0, 1.0));
    assert_eq!(a - b, Complex::new(-2.0, 3.0));
    // (1 + 2i)(3 - i) = 3 - i + 6i + 2 = 5 + 5i
    assert_eq!(a * b, Complex::new(5.0, 5.0));
    assert_eq!(Complex::new(3.0, 4.0).magnitude(), 5.0);
    assert_eq!(a.conj(), Complex::new(1.0, -2.0));
}

#[test]
fn fft_matches_naive_dft() {
    let input: Vec<Complex> = [1.0, 6.0, 2.0, 5.0, 3.0, 4.0, -1.0, 0.5]
        .iter()
        .enumerate()
        .map(|(i, &re)| Complex::new(re, i as f64 * 0.25))
        .collect();

    let expected = naive_dft(&input);
    let mut actual = input.clone();
    fft(&mut actual);

    for (a, e) in actual.iter().zip(&expected) {
        assert_close(*a, *e);
    }
}

#[test]
fn fft_of_harmonic_is_single_spike() {
    let n = 16;
    let k = 3;
    let mut data: Vec<Complex> = (0..n)
        .map(|j| Complex::from_angle(2.0 * PI * (k * j) as f64 / n as f64))
        .collect();

    fft(&mut data);

    for (i, value) in data.iter().enumerate() {
        let expected = if i == k { n as f64 } else { 0.0 };
        assert_close(*value, Complex::new(expected, 0.0));
    }
}

#[test]
fn fft_leaves_trivial_lengths_unchanged() {
    let mut empty: Vec<Complex> = Vec::new();
    fft(&mut empty);
    assert!(empty.is_empty());

    let mut single = vec![Complex::new(7.0, -2.0)];
    fft(&mut single);
    assert_eq!(single, vec![Complex::new(7.0, -2.0)]);
}

#[test]
fn ifft_inverts_fft() {
    let original: Vec<Complex> = (0..32)
        .map(|i| Complex::new((i * i % 7) as f64, (i % 3) as f64 - 1.0))
        .collect();

    let mut data = original.clone();
    fft(&mut data);
    ifft(&mut data);

    for (a, b) in data.iter().zip(&original) {
        assert_close(*a, *b);
    }
}

#[test]
fn forward_pads_to_powers_of_two() {
    let image = Raster::from_gray(5, 3, vec![10; 15]);
    let matrix = forward(&image).unwrap();

    assert_eq!(matrix.width(), 8);
    assert_eq!(matrix.height(), 4);
    assert_eq!(matrix.data().len(), 32);
}

#[test]
fn forward_dc_term_is_pixel_sum() {
    let data: Vec<u8> = (0..15).map(|v| v * 3).collect();
    let sum: u32 = data.iter().map(|&v| v as u32).sum();

    let matrix = forward(&Raster::from_gray(5, 3, data)).unwrap();

    assert_close(matrix[(0, 0)], Complex::new(sum as f64, 0.0));
}

#[test]
fn forward_rejects_invalid_images() {
    assert_eq!(
        forward(&Raster::from_gray(0, 4, Vec::new())),
        Err(FftError::EmptyImage)
    );
    assert_eq!(
        forward(&Raster::new(4, 4, 3)),
        Err(FftError::UnsupportedChannels(3))
    );
    assert_eq!(
        forward(&Raster::from_gray(4, 4, vec![0; 10])),
        Err(FftError::BufferSize {
            expected: 16,
            actual: 10
        })
    );
}

#[test]
fn round_trip_restores_single_bright_pixel() {
    let mut image = Raster::new(4, 4, 1);
    image.data[4 + 1] = 200;

    let restored = inverse(forward(&image).unwrap());

    assert_eq!(restored, image);
}

#[test]
fn round_trip_of_padded_image_after_crop() {
    let data: Vec<u8> = (0..15).map(|v| (v * 17 % 256) as u8).collect();
    let image = Raster::from_gray(5, 3, data);

    let restored = inverse(forward(&image).unwrap());
    assert_eq!((restored.width, restored.height), (8, 4));

    let cropped = restored.crop(5, 3);
    for (a, b) in cropped.data.iter().zip(&image.data) {
        assert!((*a as i16 - *b as i16).abs() <= 1);
    }
}

#[test]
fn from_data_validates_dimensions() {
    assert_eq!(
        FrequencyMatrix::from_data(6, 4, vec![Complex::ZERO; 24]),
        Err(FftError::NotPowerOfTwo {
            width: 6,
            height: 4
        })
    );
    assert_eq!(
        FrequencyMatrix::from_data(4, 4, vec![Complex::ZERO; 15]),
        Err(FftError::BufferSize {
            expected: 16,
            actual: 15
        })
    );
}

#[test]
fn frequency_coordinates_wrap() {
    let matrix = FrequencyMatrix::from_data(8, 4, vec![Complex::ZERO; 32]).unwrap();

    assert_eq!(matrix.storage_index(3, 1), (1, 3));
    assert_eq!(matrix.storage_index(-3, -1), (3, 5));
    assert_eq!(matrix.signed_frequency(3, 5), (-3, -1));
    assert_eq!(matrix.signed_frequency(2, 4), (-4, -2));
    assert_eq!(matrix.signed_frequency(0, 0), (0, 0));
}

#[test]
fn spectrum_is_normalized_to_full_scale() {
    let data: Vec<u8> = (0..64).map(|v| ((v * 37) % 251) as u8).collect();
    let matrix = forward(&Raster::from_gray(8, 8, data)).unwrap();

    let spectrum = render_spectrum(&matrix);

    assert_eq!((spectrum.width, spectrum.height, spectrum.channels), (8, 8, 1));
    assert_eq!(spectrum.data.iter().max(), Some(&255));
}

#[test]
fn spectrum_centers_zero_frequency() {
    let matrix = forward(&Raster::from_gray(8, 4, vec![50; 32])).unwrap();

    let spectrum = render_spectrum(&matrix);

    // a constant image only has a DC term
    for y in 0..4 {
        for x in 0..8 {
            let expected = if (x, y) == (4, 2) { 255 } else { 0 };
            assert_eq!(spectrum.sample(x, y, 0), expected);
        }
    }
}

#[test]
fn spectrum_of_zero_matrix_is_black() {
    let matrix = forward(&Raster::new(4, 4, 1)).unwrap();

    let spectrum = render_spectrum(&matrix);

    assert!(spectrum.data.iter().all(|&v| v == 0));
}

proptest! {
    #[test]
    fn prop_round_trip_restores_pixels(
        width in 1usize..12,
        height in 1usize..12,
        ref pixels in proptest::collection::vec(any::<u8>(), 144),
    ) {
        let data: Vec<u8> = pixels.iter().take(width * height).cloned().collect();
        let image = Raster::from_gray(width, height, data.clone());

        let restored = inverse(forward(&image).unwrap()).crop(width, height);

        prop_assert_eq!(restored.data.len(), data.len());
        for (a, b) in restored.data.iter().zip(&data) {
            prop_assert!((*a as i16 - *b as i16).abs() <= 1);
        }
    }
}
