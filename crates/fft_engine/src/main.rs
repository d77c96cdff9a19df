// Prints the FFT of a small test sequence and the inverse of that FFT.

use std::f64::consts::PI;

use clap::Parser;
use fft_engine::{Complex, fft, ifft};
use ndarray::Array1;

/// Which test sequence to use.
const TEST: usize = 3;

#[derive(Parser)]
#[command(about, long_about = None)]
struct Args {
    #[arg(long)]
    test_number: Option<usize>,
}

/// Takes the FFT of a test sequence, followed by the inverse FFT.
/// Outputs the original sequence, the FFT, and the IFFT of the FFT.
fn main() -> Result<(), String> {
    env_logger::init();

    let args = Args::parse();
    let test = args.test_number.unwrap_or(TEST);

    let mut test_data = match test {
        1 => get_test_array_1(),
        2 => get_test_array_2(),
        3 => get_test_array_3(),
        n => return Err(format!("No test sequence numbered {}", n)),
    };
    log::info!("Running test sequence {} of length {}", test, test_data.len());

    println!("Original:");
    print_sequence(&test_data);

    let slice = test_data
        .as_slice_mut()
        .ok_or("Test sequence is not contiguous")?;

    fft(slice);
    println!("FT:");
    print_sequence(&*slice);

    ifft(slice);
    println!("IFT of FT:");
    print_sequence(&*slice);

    Ok(())
}

fn print_sequence<'a>(data: impl IntoIterator<Item = &'a Complex>) {
    for value in data {
        println!("  ({:>8.4}, {:>8.4})", value.re, value.im);
    }
}

/// Constant sequence; its transform is a single spike at zero frequency.
fn get_test_array_3() -> Array1<Complex> {
    Array1::from_elem(8, Complex::new(1.0, 0.0))
}

fn get_test_array_2() -> Array1<Complex> {
    Array1::from_iter((1..=8).map(|n| Complex::from(n as f64)))
}

/// The kth harmonic, which transforms to a spike at frequency k.
fn get_test_array_1() -> Array1<Complex> {
    const LEN: usize = 4;
    let k = 1f64;

    Array1::from_iter(
        (0..LEN).map(|n| Complex::from_angle(2f64 * PI * (k / LEN as f64) * n as f64)),
    )
}
