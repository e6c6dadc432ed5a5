//! Global sample range of a mosaic frame.

use crate::image_pipeline::raw::{BayerChannel, MosaicFrame};

/// Smallest and largest sample value observed across every channel of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeStats {
    pub min: u16,
    pub max: u16,
}

impl RangeStats {
    /// A flat or empty frame has no range to stretch.
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    pub fn span(&self) -> u16 {
        self.max.saturating_sub(self.min)
    }
}

/// Scans every block of `frame` and returns the tight `(min, max)` over all four channels.
///
/// An empty frame reports `(max_sample, 0)`, which is degenerate, rather than a
/// made-up range.
pub fn compute_range(frame: &MosaicFrame) -> RangeStats {
    let mut stats = RangeStats {
        min: u16::MAX,
        max: 0,
    };
    let mut seen = false;

    for y in 0..frame.height() {
        for x in 0..frame.width() {
            for channel in BayerChannel::ALL {
                let value = frame.sample(x, y, channel);
                stats.min = stats.min.min(value);
                stats.max = stats.max.max(value);
                seen = true;
            }
        }
    }

    if !seen {
        stats.min = frame.sensor().max_sample();
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::SensorConfig;

    #[test]
    fn test_range_over_mixed_channels() {
        let sensor = SensorConfig::new(2, 2, 10);
        let frame = MosaicFrame::from_fn(sensor, |x, y, channel| match (x, y, channel) {
            (0, 0, BayerChannel::GreenRed) => 0,
            (1, 0, BayerChannel::Blue) => 1023,
            (0, 1, BayerChannel::Red) => 500,
            _ => 999,
        });

        assert_eq!(compute_range(&frame), RangeStats { min: 0, max: 1023 });
    }

    #[test]
    fn test_range_is_tight() {
        let sensor = SensorConfig::new(3, 2, 10);
        let frame = MosaicFrame::from_fn(sensor, |x, y, _| (100 + x * 7 + y * 50) as u16);
        let stats = compute_range(&frame);

        assert_eq!(stats, RangeStats { min: 100, max: 164 });
        assert!(frame.samples().iter().all(|&v| stats.min <= v && v <= stats.max));
        assert!(frame.samples().contains(&stats.min));
        assert!(frame.samples().contains(&stats.max));
    }

    #[test]
    fn test_range_is_tight_above_sensor_depth() {
        let sensor = SensorConfig::new(1, 1, 10);
        let frame = MosaicFrame::new(sensor, vec![1500, 2000, 1800, 1600]).unwrap();
        assert_eq!(compute_range(&frame), RangeStats { min: 1500, max: 2000 });
    }

    #[test]
    fn test_flat_frame_is_degenerate() {
        let frame = MosaicFrame::filled(SensorConfig::new(2, 2, 10), 300);
        let stats = compute_range(&frame);
        assert_eq!(stats, RangeStats { min: 300, max: 300 });
        assert!(stats.is_degenerate());
        assert_eq!(stats.span(), 0);
    }

    #[test]
    fn test_empty_frame_keeps_initial_bounds() {
        let frame = MosaicFrame::filled(SensorConfig::new(0, 0, 10), 0);
        let stats = compute_range(&frame);
        assert_eq!(stats, RangeStats { min: 1023, max: 0 });
        assert!(stats.is_degenerate());
    }
}
