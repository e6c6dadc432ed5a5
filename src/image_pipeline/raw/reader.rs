use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::{MosaicFrame, SensorConfig};

pub trait FrameReader {
    fn read_frame(&self, data: &[u8], sensor: &SensorConfig) -> Result<MosaicFrame>;
}
