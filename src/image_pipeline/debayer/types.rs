//! Types for debayering operations

use crate::image_pipeline::raw::types::SensorConfig;

pub const BYTES_PER_PIXEL: usize = 3;

/// Byte position of each channel inside an output pixel.
pub const BLUE_OFFSET: usize = 0;
pub const GREEN_OFFSET: usize = 1;
pub const RED_OFFSET: usize = 2;

/// One reconstructed output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    #[inline]
    pub fn write_to(self, dst: &mut [u8]) {
        dst[BLUE_OFFSET] = self.b;
        dst[GREEN_OFFSET] = self.g;
        dst[RED_OFFSET] = self.r;
    }
}

/// 8 bit BGR image after debayering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Pixel data interleaved [B, G, R, B, G, R, ...]
    pub data: Vec<u8>,
}

impl ColorImage {
    /// A black image with one pixel per block of `sensor`.
    pub fn blank(sensor: &SensorConfig) -> Self {
        Self {
            width: sensor.width,
            height: sensor.height,
            data: vec![0u8; sensor.pixel_count() * BYTES_PER_PIXEL],
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn row_bytes(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    pub fn pixel(&self, x: usize, y: usize) -> Bgr {
        let start = (y * self.width + x) * BYTES_PER_PIXEL;
        Bgr {
            b: self.data[start + BLUE_OFFSET],
            g: self.data[start + GREEN_OFFSET],
            r: self.data[start + RED_OFFSET],
        }
    }

    pub fn pixels(&self) -> impl Iterator<Item = Bgr> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|p| Bgr::new(p[BLUE_OFFSET], p[GREEN_OFFSET], p[RED_OFFSET]))
    }
}

/// Rounding applied when averaging the greens and when reducing samples to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantization {
    /// Round to nearest, halves up.
    #[default]
    Nearest,
    /// Drop the fraction at both steps.
    Truncate,
}

impl Quantization {
    #[inline]
    pub fn average(self, a: u16, b: u16) -> u16 {
        let sum = a as u32 + b as u32;
        match self {
            Quantization::Nearest => ((sum + 1) / 2) as u16,
            Quantization::Truncate => (sum / 2) as u16,
        }
    }

    /// Linearly maps `value` from `[0, max_sample]` onto `[0, 255]`.
    #[inline]
    pub fn to_u8(self, value: u16, max_sample: u16) -> u8 {
        let max = max_sample.max(1) as u32;
        let value = (value as u32).min(max);
        let scaled = match self {
            Quantization::Nearest => (value * u8::MAX as u32 + max / 2) / max,
            Quantization::Truncate => value * u8::MAX as u32 / max,
        };
        scaled as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantization_endpoints() {
        for q in [Quantization::Nearest, Quantization::Truncate] {
            assert_eq!(q.to_u8(0, 1023), 0);
            assert_eq!(q.to_u8(1023, 1023), 255);
        }
    }

    #[test]
    fn test_quantization_rounding() {
        // 512 * 255 / 1023 = 127.62...
        assert_eq!(Quantization::Nearest.to_u8(512, 1023), 128);
        assert_eq!(Quantization::Truncate.to_u8(512, 1023), 127);
        assert_eq!(Quantization::Nearest.average(512, 511), 512);
        assert_eq!(Quantization::Truncate.average(512, 511), 511);
    }

    #[test]
    fn test_out_of_range_samples_saturate() {
        assert_eq!(Quantization::Nearest.to_u8(4000, 1023), 255);
    }

    #[test]
    fn test_pixel_accessor_uses_bgr_order() {
        let mut image = ColorImage::blank(&SensorConfig::new(2, 1, 10));
        Bgr::new(1, 2, 3).write_to(&mut image.data[3..6]);
        assert_eq!(&image.data[3..6], &[1, 2, 3]);
        assert_eq!(image.pixel(1, 0), Bgr { b: 1, g: 2, r: 3 });
        assert_eq!(image.pixels().count(), 2);
    }
}
