//! TGA output and conversion configuration types

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::types::Quantization;
use crate::image_pipeline::raw::types::SensorConfig;

pub const TGA_HEADER_LEN: usize = 18;
/// Width and height are stored as 16 bit fields.
pub const TGA_MAX_DIMENSION: usize = u16::MAX as usize;

/// Image type 2: uncompressed true-color.
const IMAGE_TYPE_TRUE_COLOR: u8 = 2;
const BITS_PER_PIXEL: u8 = 24;
/// Image descriptor bit 5: rows are stored top to bottom.
const DESCRIPTOR_TOP_LEFT: u8 = 0x20;

/// The fixed 18 byte header written in front of the BGR payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaHeader {
    pub width: u16,
    pub height: u16,
}

impl TgaHeader {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let to_u16 = |v: usize| {
            u16::try_from(v).map_err(|_| {
                ConversionError::EncodeError(format!(
                    "{}x{} does not fit in a TGA header",
                    width, height
                ))
            })
        };
        Ok(Self {
            width: to_u16(width)?,
            height: to_u16(height)?,
        })
    }

    pub fn to_bytes(&self) -> [u8; TGA_HEADER_LEN] {
        let mut header = [0u8; TGA_HEADER_LEN];
        header[2] = IMAGE_TYPE_TRUE_COLOR;
        header[12..14].copy_from_slice(&self.width.to_le_bytes());
        header[14..16].copy_from_slice(&self.height.to_le_bytes());
        header[16] = BITS_PER_PIXEL;
        header[17] = DESCRIPTOR_TOP_LEFT;
        header
    }
}

/// Configuration for RG10 to TGA conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Frame geometry and sample depth of the sensor
    pub sensor: SensorConfig,
    /// Whether to stretch the sample range to full scale before debayering
    pub normalize: bool,
    /// Rounding used for the green average and the 8 bit reduction
    pub quantization: Quantization,
    /// Whether to debayer output rows on the rayon thread pool
    pub parallel: bool,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
            normalize: true,
            quantization: Quantization::default(),
            parallel: false,
            validate_dimensions: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    sensor: Option<SensorConfig>,
    normalize: Option<bool>,
    quantization: Option<Quantization>,
    parallel: Option<bool>,
    validate_dimensions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = Some(sensor);
        self
    }

    pub fn normalize(mut self, enable: bool) -> Self {
        self.normalize = Some(enable);
        self
    }

    pub fn quantization(mut self, quantization: Quantization) -> Self {
        self.quantization = Some(quantization);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            sensor: self.sensor.unwrap_or(default.sensor),
            normalize: self.normalize.unwrap_or(default.normalize),
            quantization: self.quantization.unwrap_or(default.quantization),
            parallel: self.parallel.unwrap_or(default.parallel),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}
