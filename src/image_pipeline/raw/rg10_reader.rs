//! Reader for unpacked little-endian RG10 frames.
//!
//! The sensor delivers each 10 bit sample in its own 16 bit little-endian slot,
//! in plain raster order of the `2W x 2H` mosaic. There is no header, so the
//! byte length and the sample range are all that can be checked.

use tracing::{debug, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::geometry::BYTES_PER_SAMPLE;
use crate::image_pipeline::raw::reader::FrameReader;
use crate::image_pipeline::raw::types::{MosaicFrame, SensorConfig};

pub struct Rg10Reader;

impl FrameReader for Rg10Reader {
    /// Decodes a raw RG10 blob into a [`MosaicFrame`].
    ///
    /// # Errors
    ///
    /// * `ConversionError::InputSizeMismatch` - `data` is not exactly
    ///   [`SensorConfig::frame_bytes`] long
    /// * `ConversionError::SampleOutOfRange` - a sample does not fit in
    ///   `sample_bits`; the first offending sample is reported
    ///
    /// # Examples
    ///
    /// ```
    /// use rg10_tga_rs::image_pipeline::{FrameReader, Rg10Reader, SensorConfig};
    ///
    /// let sensor = SensorConfig::new(1, 1, 10);
    /// let bytes = [0xFF, 0x03, 0x00, 0x02, 0xFF, 0x01, 0x00, 0x00];
    /// let frame = Rg10Reader.read_frame(&bytes, &sensor).unwrap();
    /// assert_eq!(frame.samples(), &[1023, 512, 511, 0]);
    /// ```
    fn read_frame(&self, data: &[u8], sensor: &SensorConfig) -> Result<MosaicFrame> {
        let expected = sensor.frame_bytes();
        debug!("Decoding RG10 frame, {} bytes ({} expected)", data.len(), expected);

        if data.len() != expected {
            return Err(ConversionError::InputSizeMismatch {
                expected,
                got: data.len(),
            });
        }

        let samples: Vec<u16> = data
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        let max_sample = sensor.max_sample();
        if let Some((offset, &value)) = samples.iter().enumerate().find(|&(_, &v)| v > max_sample) {
            let clipped = samples.iter().filter(|&&v| v > max_sample).count();
            warn!(
                "{} samples exceed the {} bit range (max {})",
                clipped, sensor.sample_bits, max_sample
            );
            return Err(ConversionError::SampleOutOfRange {
                offset,
                value,
                max: max_sample,
            });
        }

        debug!("Decoded frame: {}x{} blocks", sensor.width, sensor.height);
        MosaicFrame::new(*sensor, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::geometry::BayerChannel;

    fn encode(samples: &[u16]) -> Vec<u8> {
        samples.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_reads_little_endian_raster() {
        let sensor = SensorConfig::new(2, 1, 10);
        // red row: R Gr R Gr, blue row: Gb B Gb B
        let bytes = encode(&[10, 11, 20, 21, 12, 13, 22, 23]);
        let frame = Rg10Reader.read_frame(&bytes, &sensor).unwrap();

        assert_eq!(frame.sample(0, 0, BayerChannel::Red), 10);
        assert_eq!(frame.sample(0, 0, BayerChannel::GreenRed), 11);
        assert_eq!(frame.sample(0, 0, BayerChannel::GreenBlue), 12);
        assert_eq!(frame.sample(0, 0, BayerChannel::Blue), 13);
        assert_eq!(frame.sample(1, 0, BayerChannel::Red), 20);
        assert_eq!(frame.sample(1, 0, BayerChannel::Blue), 23);
    }

    #[test]
    fn test_rejects_short_input() {
        let sensor = SensorConfig::new(2, 2, 10);
        let bytes = vec![0u8; sensor.frame_bytes() - 2];
        let err = Rg10Reader.read_frame(&bytes, &sensor).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::InputSizeMismatch { expected: 32, got: 30 }
        ));
    }

    #[test]
    fn test_rejects_samples_above_sensor_depth() {
        let sensor = SensorConfig::new(1, 1, 10);
        let bytes = encode(&[1500, 2000, 1800, 1600]);
        let err = Rg10Reader.read_frame(&bytes, &sensor).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::SampleOutOfRange { offset: 0, value: 1500, max: 1023 }
        ));
    }

    #[test]
    fn test_reports_first_out_of_range_sample() {
        let sensor = SensorConfig::new(2, 1, 10);
        let bytes = encode(&[0, 1023, 5, 7, 1024, 3, 9, 4096]);
        assert!(matches!(
            Rg10Reader.read_frame(&bytes, &sensor),
            Err(ConversionError::SampleOutOfRange { offset: 4, value: 1024, max: 1023 })
        ));
    }

    #[test]
    fn test_full_depth_samples_are_accepted() {
        let sensor = SensorConfig::new(1, 1, 12);
        let bytes = encode(&[4095, 1500, 2000, 0]);
        let frame = Rg10Reader.read_frame(&bytes, &sensor).unwrap();
        assert_eq!(frame.samples(), &[4095, 1500, 2000, 0]);
    }

    #[test]
    fn test_rejects_oversized_input() {
        let sensor = SensorConfig::new(1, 1, 10);
        let bytes = vec![0u8; 9];
        assert!(matches!(
            Rg10Reader.read_frame(&bytes, &sensor),
            Err(ConversionError::InputSizeMismatch { expected: 8, got: 9 })
        ));
    }
}
