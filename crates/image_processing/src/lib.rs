// top-level library module

pub mod basic_ops;
pub mod convolution;
pub mod fft;

use fft_engine::Raster;
use image::{ColorType, DynamicImage};
use rayon::{ThreadPool, ThreadPoolBuilder};

/// An image moving through the pipeline, together with where it will be
/// written and the thread pool used by the parallel stages.
pub struct ImageProcessor {
    pub image: Raster,
    pub output_path: String,
    pub thread_pool: ThreadPool,
}

impl ImageProcessor {
    pub fn new(image: Raster, output_path: &str, num_threads: usize) -> Result<Self, String> {
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| format!("Unable to build thread pool: {}", e))?;

        Ok(Self {
            image,
            output_path: output_path.to_string(),
            thread_pool,
        })
    }

    pub fn from_file(input_path: &str, output_path: &str, num_threads: usize) -> Result<Self, String> {
        let image = load_raster(input_path)?;
        log::info!(
            "Loaded '{}' ({}x{}, {} channel(s))",
            input_path,
            image.width,
            image.height,
            image.channels
        );

        Self::new(image, output_path, num_threads)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.image.width, self.image.height)
    }

    pub fn save(&self) -> Result<(), String> {
        save_raster(&self.image, &self.output_path)
    }
}

/// Read an image file into a raster: 8-bit gray when the source has no
/// color, 8-bit RGB otherwise.
pub fn load_raster(path: &str) -> Result<Raster, String> {
    let image =
        image::open(path).map_err(|e| format!("Unable to read image at path {}: {}", path, e))?;

    Ok(raster_from_image(image))
}

pub fn raster_from_image(image: DynamicImage) -> Raster {
    let width = image.width() as usize;
    let height = image.height() as usize;

    if image.color().has_color() {
        Raster {
            width,
            height,
            channels: 3,
            data: image.to_rgb8().into_raw(),
        }
    } else {
        Raster::from_gray(width, height, image.to_luma8().into_raw())
    }
}

/// Write a raster, choosing the file format from the path extension.
pub fn save_raster(raster: &Raster, path: &str) -> Result<(), String> {
    let color = match raster.channels {
        1 => ColorType::L8,
        3 => ColorType::Rgb8,
        n => return Err(format!("Cannot save image with {} channels", n)),
    };

    image::save_buffer(
        path,
        &raster.data,
        raster.width as u32,
        raster.height as u32,
        color,
    )
    .map_err(|e| format!("Unable to write image to {}: {}", path, e))?;

    log::info!("Image written to '{}'", path);
    Ok(())
}

/// Run one pipeline stage; with the `timing` feature its duration is logged.
pub fn timed<T>(
    #[cfg_attr(not(feature = "timing"), allow(unused_variables))] stage: &str,
    f: impl FnOnce() -> T,
) -> T {
    #[cfg(feature = "timing")]
    let time = std::time::Instant::now();

    let result = f();

    #[cfg(feature = "timing")]
    log::info!("{} ... {:>2.3}s", stage, time.elapsed().as_secs_f32());

    result
}
