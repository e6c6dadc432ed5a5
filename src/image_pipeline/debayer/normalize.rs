//! In-place contrast stretch of a mosaic frame.

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::statistics::{RangeStats, compute_range};
use crate::image_pipeline::raw::{BayerChannel, MosaicFrame};

/// Stretches `frame` so its samples span `[0, max_sample]`.
///
/// The range is measured on the whole frame before the first sample is
/// rewritten. Returns the range that was measured.
///
/// # Errors
///
/// `ConversionError::DegenerateRange` when every sample has the same value (or
/// the frame is empty). The frame is left untouched in that case.
pub fn normalize(frame: &mut MosaicFrame) -> Result<RangeStats> {
    let stats = compute_range(frame);
    normalize_with(frame, stats)?;
    Ok(stats)
}

/// Applies the stretch for a range that was already measured on `frame`.
pub fn normalize_with(frame: &mut MosaicFrame, stats: RangeStats) -> Result<()> {
    if stats.is_degenerate() {
        return Err(ConversionError::DegenerateRange {
            min: stats.min,
            max: stats.max,
        });
    }

    let max_sample = frame.sensor().max_sample();
    let scale = max_sample as f64 / stats.span() as f64;
    debug!(min = stats.min, max = stats.max, scale, "Normalizing frame");

    for y in 0..frame.height() {
        for x in 0..frame.width() {
            for channel in BayerChannel::ALL {
                let value = frame.sample(x, y, channel);
                frame.set_sample(x, y, channel, stretch(value, stats.min, scale, max_sample));
            }
        }
    }

    Ok(())
}

#[inline]
fn stretch(value: u16, min: u16, scale: f64, max_sample: u16) -> u16 {
    let shifted = value.saturating_sub(min) as f64;
    let scaled = (shifted * scale).round();
    scaled.min(max_sample as f64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::SensorConfig;
    use proptest::prelude::*;

    fn ramp(sensor: SensorConfig, lo: u16, step: u16) -> MosaicFrame {
        let mut next = lo;
        MosaicFrame::from_fn(sensor, |_, _, _| {
            let v = next;
            next += step;
            v
        })
    }

    #[test]
    fn test_stretches_to_full_range() {
        let mut frame = ramp(SensorConfig::new(2, 2, 10), 200, 10);
        let measured = normalize(&mut frame).unwrap();

        assert_eq!(measured, RangeStats { min: 200, max: 350 });
        assert_eq!(compute_range(&frame), RangeStats { min: 0, max: 1023 });
    }

    #[test]
    fn test_rounds_to_nearest() {
        let sensor = SensorConfig::new(1, 1, 10);
        let mut frame = MosaicFrame::new(sensor, vec![0, 1, 2, 3]).unwrap();
        normalize(&mut frame).unwrap();
        // 1023 / 3 = 341 exactly
        assert_eq!(frame.samples(), &[0, 341, 682, 1023]);

        let mut frame = MosaicFrame::new(sensor, vec![0, 1, 1, 2]).unwrap();
        normalize(&mut frame).unwrap();
        // 511.5 rounds away from zero
        assert_eq!(frame.samples(), &[0, 512, 512, 1023]);
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut frame = ramp(SensorConfig::new(3, 2, 10), 17, 31);
        normalize(&mut frame).unwrap();
        let once = frame.clone();

        let measured = normalize(&mut frame).unwrap();
        assert_eq!(measured, RangeStats { min: 0, max: 1023 });
        assert_eq!(frame, once);
    }

    #[test]
    fn test_out_of_depth_frame_still_reaches_zero() {
        let sensor = SensorConfig::new(1, 1, 10);
        let mut frame = MosaicFrame::new(sensor, vec![1500, 2000, 1800, 1600]).unwrap();
        normalize(&mut frame).unwrap();

        assert_eq!(frame.samples(), &[0, 1023, 614, 205]);
        assert_eq!(compute_range(&frame), RangeStats { min: 0, max: 1023 });
    }

    #[test]
    fn test_flat_frame_is_rejected_untouched() {
        let mut frame = MosaicFrame::filled(SensorConfig::new(2, 2, 10), 777);
        let err = normalize(&mut frame).unwrap_err();

        assert!(matches!(
            err,
            ConversionError::DegenerateRange { min: 777, max: 777 }
        ));
        assert!(frame.samples().iter().all(|&v| v == 777));
    }

    proptest! {
        #[test]
        fn prop_normalized_frame_spans_full_range(
            samples in prop::collection::vec(0u16..=1023, 16)
        ) {
            let sensor = SensorConfig::new(2, 2, 10);
            let mut frame = MosaicFrame::new(sensor, samples).unwrap();
            let before = compute_range(&frame);
            prop_assume!(!before.is_degenerate());

            normalize(&mut frame).unwrap();
            prop_assert!(frame.samples().iter().all(|&v| v <= 1023));
            prop_assert_eq!(compute_range(&frame), RangeStats { min: 0, max: 1023 });

            let once = frame.clone();
            normalize(&mut frame).unwrap();
            prop_assert_eq!(frame, once);
        }

        #[test]
        fn prop_normalize_preserves_order(
            samples in prop::collection::vec(0u16..=1023, 16)
        ) {
            let sensor = SensorConfig::new(2, 2, 10);
            let mut frame = MosaicFrame::new(sensor, samples.clone()).unwrap();
            prop_assume!(!compute_range(&frame).is_degenerate());
            normalize(&mut frame).unwrap();

            for (i, j) in (0..16).flat_map(|i| (0..16).map(move |j| (i, j))) {
                if samples[i] <= samples[j] {
                    prop_assert!(frame.samples()[i] <= frame.samples()[j]);
                }
            }
        }
    }
}
