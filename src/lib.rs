//! Converts a single RG10 Bayer sensor frame into an 8-bit BGR TGA image.
//!
//! The conversion runs in four stages over one frame: range statistics,
//! optional in-place normalization, block demosaicing and TGA encoding.
//! See [`image_pipeline::Rg10ToTgaPipeline`] for the orchestration.

pub mod image_pipeline;
pub mod logger;
