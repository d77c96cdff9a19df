// Byte rasters exchanged with the imaging side of the pipeline.

/// An 8-bit raster stored row major with interleaved channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl Raster {
    /// A zero-filled raster.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width * height * channels],
        }
    }

    pub fn from_gray(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels: 1,
            data,
        }
    }

    /// Sample of `channel` at column `x`, row `y`.
    pub fn sample(&self, x: usize, y: usize, channel: usize) -> u8 {
        self.data[self.channels * (y * self.width + x) + channel]
    }

    /// Keep the top-left `width` x `height` region, e.g. to drop the padding
    /// added by the forward transform. Requests larger than the raster are
    /// clamped to its size.
    pub fn crop(&self, width: usize, height: usize) -> Raster {
        let width = width.min(self.width);
        let height = height.min(self.height);
        let row_len = width * self.channels;

        let mut data = Vec::with_capacity(row_len * height);
        for y in 0..height {
            let offset = y * self.width * self.channels;
            data.extend_from_slice(&self.data[offset..offset + row_len]);
        }

        Raster {
            width,
            height,
            channels: self.channels,
            data,
        }
    }
}
