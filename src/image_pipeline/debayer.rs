//! Debayering module for converting RG10 mosaic frames to BGR images
//!
//! The stages run in order on one frame: [`compute_range`] on the raw samples,
//! the optional in-place [`normalize`], then [`CpuDebayer::process`].

pub mod cpu_debayer;
pub mod normalize;
pub mod statistics;
pub mod types;

pub use cpu_debayer::CpuDebayer;
pub use normalize::{normalize, normalize_with};
pub use statistics::{RangeStats, compute_range};
pub use types::{Bgr, ColorImage, Quantization};
