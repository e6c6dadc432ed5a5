//! RG10 frame reading module
//!
//! This module provides the mosaic frame model, its sample addressing and the
//! reader that turns a raw sensor blob into a frame.

pub mod geometry;
mod reader;
mod rg10_reader;
pub mod types;

pub use geometry::BayerChannel;
pub use reader::FrameReader;
pub use rg10_reader::Rg10Reader;
pub use types::{MosaicFrame, SensorConfig};
