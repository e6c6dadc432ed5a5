use rayon::prelude::*;
use tracing::info;

use crate::image_pipeline::debayer::types::{BYTES_PER_PIXEL, Bgr, ColorImage, Quantization};
use crate::image_pipeline::raw::{BayerChannel, MosaicFrame};

/// Block-average demosaicer.
///
/// Every 2x2 RGGB block becomes one output pixel: red and blue are taken as they
/// are, the two greens are averaged, and all three are reduced to 8 bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuDebayer {
    quantization: Quantization,
    parallel: bool,
}

impl CpuDebayer {
    pub fn new(quantization: Quantization) -> Self {
        Self {
            quantization,
            parallel: false,
        }
    }

    /// Spread output rows across the rayon thread pool.
    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    pub fn process(&self, frame: &MosaicFrame) -> ColorImage {
        let width = frame.width();
        let height = frame.height();
        info!(
            "Starting CPU debayering for frame {}x{} ({:?}, parallel={})",
            width, height, self.quantization, self.parallel
        );

        let mut image = ColorImage::blank(frame.sensor());
        let row_bytes = image.row_bytes();
        if row_bytes == 0 {
            return image;
        }

        if self.parallel {
            image
                .data
                .par_chunks_mut(row_bytes)
                .enumerate()
                .for_each(|(y, row)| self.fill_row(frame, y, row));
        } else {
            for (y, row) in image.data.chunks_mut(row_bytes).enumerate() {
                self.fill_row(frame, y, row);
            }
        }

        image
    }

    /// Writes output row `y`, one pixel per block of block row `y`.
    fn fill_row(&self, frame: &MosaicFrame, y: usize, row: &mut [u8]) {
        for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            self.reconstruct(frame, x, y).write_to(pixel);
        }
    }

    #[inline]
    fn reconstruct(&self, frame: &MosaicFrame, x: usize, y: usize) -> Bgr {
        let q = self.quantization;
        let max_sample = frame.sensor().max_sample();

        let green = q.average(
            frame.sample(x, y, BayerChannel::GreenRed),
            frame.sample(x, y, BayerChannel::GreenBlue),
        );

        Bgr {
            b: q.to_u8(frame.sample(x, y, BayerChannel::Blue), max_sample),
            g: q.to_u8(green, max_sample),
            r: q.to_u8(frame.sample(x, y, BayerChannel::Red), max_sample),
        }
    }
}
