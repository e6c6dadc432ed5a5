//! Image processing pipeline module
//!
//! This module provides a structured approach to the RG10 to TGA conversion,
//! with separate modules for frame reading, debayering, TGA writing, and
//! conversion orchestration.

pub mod raw;
pub mod debayer;
pub mod tga;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    PipelineTimings,
    Result,
};

pub use raw::{
    BayerChannel,
    FrameReader,
    MosaicFrame,
    Rg10Reader,
    SensorConfig,
};

pub use debayer::{
    Bgr,
    ColorImage,
    CpuDebayer,
    Quantization,
    RangeStats,
    compute_range,
    normalize,
};

pub use tga::{
    ConversionConfig,
    ConversionConfigBuilder,
    ImageWriter,
    StandardTgaWriter,
    TgaHeader,
};

pub use conversions::{
    Rg10ToTgaPipeline,
};
