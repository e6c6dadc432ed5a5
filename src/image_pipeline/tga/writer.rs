use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::debayer::types::ColorImage;

pub trait ImageWriter {
    fn write_image(&self, image: &ColorImage, output: &mut dyn Write) -> Result<()>;
}
