// CLI for the image processing pipeline built on fft_engine.

use clap::{ArgAction, Args, Parser};
use fft_engine::Notch;
use image_processing::{
    ImageProcessor, basic_ops, convolution,
    fft::{AutoNotch, Emphasis, FrequencyOptions},
    timed,
};

// setup command line args

#[derive(Parser)]
#[command(about = "Apply a sequence of image transforms", long_about = None)]
pub struct CliArgs {
    #[clap(long, required = true)]
    input: String,
    #[clap(long, required = true)]
    output: String,
    /// Worker threads for the parallel stages; defaults to the CPU count.
    #[clap(long)]
    threads: Option<usize>,

    #[command(flatten)]
    point: PointArgs,
    #[command(flatten)]
    spatial: SpatialArgs,
    #[command(flatten)]
    fft: FftArgs,
}

#[derive(Debug, Args)]
pub struct PointArgs {
    #[clap(long, action)]
    grayscale: bool,
    #[clap(long, num_args = 2, value_names = ["GAIN", "BIAS"], allow_negative_numbers = true)]
    linear: Option<Vec<f64>>,
    #[clap(long)]
    gamma: Option<f64>,
    #[clap(long, action)]
    invert: bool,
    /// Applied last, after the frequency stage.
    #[clap(long)]
    threshold: Option<u8>,
}

#[derive(Debug, Args)]
pub struct SpatialArgs {
    #[clap(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    resize: Option<Vec<u32>>,
    #[clap(long, action)]
    bilinear: bool,
    #[clap(long, action)]
    blur: bool,
    #[clap(long, action)]
    sharpen: bool,
    #[clap(long, action)]
    sobel: bool,
}

#[derive(Debug, Args)]
pub struct FftArgs {
    #[clap(long, value_name = "PATH")]
    test_fft: Option<String>,
    #[clap(long, value_name = "PATH")]
    fft_spectrum: Option<String>,
    #[clap(long, value_name = "RADIUS")]
    fft_lowpass: Option<usize>,
    #[clap(long, value_name = "RADIUS")]
    fft_highpass: Option<usize>,
    /// Center-relative frequency and radius; may be repeated.
    #[clap(
        long,
        num_args = 3,
        value_names = ["U", "V", "RADIUS"],
        allow_negative_numbers = true,
        action = ArgAction::Append
    )]
    fft_notch: Vec<isize>,
    #[clap(long, value_name = "RADIUS")]
    fft_emphasis: Option<usize>,
    #[clap(long, default_value_t = 0.5)]
    fft_emphasis_low: f64,
    #[clap(long, default_value_t = 1.5)]
    fft_emphasis_high: f64,
    #[clap(long, value_name = "RADIUS")]
    auto_notch: Option<usize>,
    #[clap(long, default_value_t = 10.0)]
    auto_notch_factor: f64,
}

impl FftArgs {
    fn to_options(&self) -> Result<FrequencyOptions, String> {
        let notches = self
            .fft_notch
            .chunks_exact(3)
            .map(|n| {
                let radius = usize::try_from(n[2])
                    .map_err(|_| format!("Notch radius must not be negative, got {}", n[2]))?;
                Ok(Notch::new(n[0], n[1], radius))
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(FrequencyOptions {
            test_fft_path: self.test_fft.clone(),
            spectrum_path: self.fft_spectrum.clone(),
            lowpass_radius: self.fft_lowpass,
            highpass_radius: self.fft_highpass,
            emphasis: self.fft_emphasis.map(|radius| Emphasis {
                radius,
                k_low: self.fft_emphasis_low,
                k_high: self.fft_emphasis_high,
            }),
            notches,
            auto_notch: self.auto_notch.map(|radius| AutoNotch {
                radius,
                threshold_factor: self.auto_notch_factor,
            }),
        })
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    let args = CliArgs::parse();
    let fft_options = args.fft.to_options()?;
    let threads = args.threads.unwrap_or_else(num_cpus::get);

    let mut image_proc = ImageProcessor::from_file(&args.input, &args.output, threads)?;

    // point transforms

    if args.point.grayscale {
        timed("grayscale", || basic_ops::to_grayscale(&mut image_proc));
    }

    if let Some(linear) = &args.point.linear {
        timed("linear", || {
            basic_ops::linear_transform(&mut image_proc, linear[0], linear[1])
        });
    }

    if let Some(gamma) = args.point.gamma {
        timed("gamma", || basic_ops::gamma_correction(&mut image_proc, gamma))?;
    }

    if args.point.invert {
        timed("invert", || basic_ops::invert(&mut image_proc));
    }

    // geometry and spatial filters

    if let Some(size) = &args.spatial.resize {
        timed("resize", || {
            basic_ops::resize(&mut image_proc, size[0], size[1], args.spatial.bilinear)
        })?;
    }

    if args.spatial.blur {
        timed("blur", || convolution::box_blur(&mut image_proc));
    }

    if args.spatial.sharpen {
        timed("sharpen", || convolution::sharpen(&mut image_proc));
    }

    if args.spatial.sobel {
        timed("sobel", || convolution::sobel(&mut image_proc));
    }

    // frequency domain

    if fft_options.is_requested() {
        timed("fft", || {
            image_processing::fft::fft_image(&mut image_proc, &fft_options)
        })?;
    }

    if let Some(threshold) = args.point.threshold {
        timed("threshold", || basic_ops::threshold(&mut image_proc, threshold));
    }

    image_proc.save()?;
    log::info!("Done.");

    Ok(())
}
