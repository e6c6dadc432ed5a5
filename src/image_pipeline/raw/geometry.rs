//! Sample addressing inside an RGGB mosaic.
//!
//! ```text
//!   +----+----+----+----+
//!   | R  | Gr | R  | Gr |   red row
//!   +----+----+----+----+
//!   | Gb | B  | Gb | B  |   blue row
//!   +----+----+----+----+
//! ```
//!
//! Block `(x, y)` is anchored at mosaic sample `(2x, 2y)`. A mosaic row holds
//! `2 * width` samples, so one block row spans `4 * width` samples.

use core::fmt;

use crate::image_pipeline::raw::types::SensorConfig;

pub const SAMPLES_PER_BLOCK: usize = 4;
pub const BYTES_PER_SAMPLE: usize = 2;

/// Position of a sample inside its 2x2 block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BayerChannel {
    /// Top-left.
    Red = 0,
    /// Top-right, green on a red row.
    GreenRed = 1,
    /// Bottom-left, green on a blue row.
    GreenBlue = 2,
    /// Bottom-right.
    Blue = 3,
}

impl BayerChannel {
    pub const ALL: [BayerChannel; 4] = [
        BayerChannel::Red,
        BayerChannel::GreenRed,
        BayerChannel::GreenBlue,
        BayerChannel::Blue,
    ];

    /// Offset of this channel relative to the block anchor.
    #[inline]
    pub const fn anchor_offset(self, mosaic_width: usize) -> usize {
        match self {
            BayerChannel::Red => 0,
            BayerChannel::GreenRed => 1,
            BayerChannel::GreenBlue => mosaic_width,
            BayerChannel::Blue => mosaic_width + 1,
        }
    }
}

impl fmt::Display for BayerChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => f.write_str("R"),
            Self::GreenRed => f.write_str("Gr"),
            Self::GreenBlue => f.write_str("Gb"),
            Self::Blue => f.write_str("B"),
        }
    }
}

/// Samples per mosaic row.
#[inline]
pub const fn mosaic_width(sensor: &SensorConfig) -> usize {
    sensor.width * 2
}

/// Samples per block row (one red row plus one blue row).
#[inline]
pub const fn block_row_stride(sensor: &SensorConfig) -> usize {
    sensor.width * SAMPLES_PER_BLOCK
}

/// Linear offset of the block anchor (the red sample) of block `(x, y)`.
#[inline]
pub const fn anchor_offset(sensor: &SensorConfig, x: usize, y: usize) -> usize {
    y * block_row_stride(sensor) + x * 2
}

/// Linear offset of `channel` in block `(x, y)`.
#[inline]
pub const fn sample_offset(sensor: &SensorConfig, x: usize, y: usize, channel: BayerChannel) -> usize {
    anchor_offset(sensor, x, y) + channel.anchor_offset(mosaic_width(sensor))
}
