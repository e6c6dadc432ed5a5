//! TGA writing module
//!
//! This module provides the minimal TGA encoder and the conversion configuration.

mod writer;
mod standard_tga_writer;
pub mod types;

pub use writer::ImageWriter;
pub use standard_tga_writer::StandardTgaWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder, TgaHeader, TGA_HEADER_LEN, TGA_MAX_DIMENSION};
