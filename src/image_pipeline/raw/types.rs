//! RG10 frame data types

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::geometry::{self, BayerChannel};

/// Fixed description of the sensor output a frame comes from.
///
/// `width` and `height` count output pixels. Each output pixel is backed by one
/// 2x2 RGGB block, so the mosaic itself is `2 * width` by `2 * height` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    pub width: usize,
    pub height: usize,
    /// Significant bits per sample; each sample still occupies a 16 bit slot.
    pub sample_bits: u32,
}

impl SensorConfig {
    /// IMX477 in 1920x1080 RG10 mode.
    pub const IMX477_1080P: SensorConfig = SensorConfig {
        width: 1920,
        height: 1080,
        sample_bits: 10,
    };

    pub const fn new(width: usize, height: usize, sample_bits: u32) -> Self {
        Self { width, height, sample_bits }
    }

    /// Sample depths that fit the 16 bit slot.
    pub const SAMPLE_BITS_RANGE: core::ops::RangeInclusive<u32> = 1..=16;

    pub fn has_valid_depth(&self) -> bool {
        Self::SAMPLE_BITS_RANGE.contains(&self.sample_bits)
    }

    /// Largest value a sample can hold, e.g. 1023 for 10 bit samples.
    ///
    /// Depths beyond 16 bits saturate at `u16::MAX`.
    pub const fn max_sample(&self) -> u16 {
        if self.sample_bits >= u16::BITS {
            u16::MAX
        } else {
            ((1u32 << self.sample_bits) - 1) as u16
        }
    }

    pub const fn sample_count(&self) -> usize {
        self.width * self.height * geometry::SAMPLES_PER_BLOCK
    }

    /// Size in bytes of one little-endian RG10 frame.
    pub const fn frame_bytes(&self) -> usize {
        self.sample_count() * geometry::BYTES_PER_SAMPLE
    }

    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::IMX477_1080P
    }
}

/// A single mosaiced RG10 frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicFrame {
    sensor: SensorConfig,
    samples: Vec<u16>,
}

impl MosaicFrame {
    pub fn new(sensor: SensorConfig, samples: Vec<u16>) -> Result<Self> {
        let expected = sensor.sample_count();
        if samples.len() != expected {
            return Err(ConversionError::InputSizeMismatch {
                expected: expected * geometry::BYTES_PER_SAMPLE,
                got: samples.len() * geometry::BYTES_PER_SAMPLE,
            });
        }
        Ok(Self { sensor, samples })
    }

    /// Builds a frame by evaluating `f` for every block and channel.
    pub fn from_fn(sensor: SensorConfig, mut f: impl FnMut(usize, usize, BayerChannel) -> u16) -> Self {
        let mut samples = vec![0u16; sensor.sample_count()];
        for y in 0..sensor.height {
            for x in 0..sensor.width {
                for channel in BayerChannel::ALL {
                    samples[geometry::sample_offset(&sensor, x, y, channel)] = f(x, y, channel);
                }
            }
        }
        Self { sensor, samples }
    }

    pub fn filled(sensor: SensorConfig, value: u16) -> Self {
        Self {
            sensor,
            samples: vec![value; sensor.sample_count()],
        }
    }

    pub fn sensor(&self) -> &SensorConfig {
        &self.sensor
    }

    pub fn width(&self) -> usize {
        self.sensor.width
    }

    pub fn height(&self) -> usize {
        self.sensor.height
    }

    #[inline]
    pub fn sample(&self, x: usize, y: usize, channel: BayerChannel) -> u16 {
        self.samples[geometry::sample_offset(&self.sensor, x, y, channel)]
    }

    #[inline]
    pub fn set_sample(&mut self, x: usize, y: usize, channel: BayerChannel, value: u16) {
        let offset = geometry::sample_offset(&self.sensor, x, y, channel);
        self.samples[offset] = value;
    }

    pub fn samples(&self) -> &[u16] {
        &self.samples
    }
}
