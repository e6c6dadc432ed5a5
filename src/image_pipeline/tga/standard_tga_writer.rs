use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::debayer::types::ColorImage;
use crate::image_pipeline::tga::types::TgaHeader;
use crate::image_pipeline::tga::writer::ImageWriter;

/// Writes an uncompressed 24 bit top-left origin TGA.
pub struct StandardTgaWriter;

impl ImageWriter for StandardTgaWriter {
    fn write_image(&self, image: &ColorImage, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding TGA image: {}x{}", image.width, image.height);

        let expected = image.pixel_count() * 3;
        if image.data.len() != expected {
            return Err(ConversionError::EncodeError(format!(
                "payload is {} bytes, {}x{} needs {}",
                image.data.len(),
                image.width,
                image.height,
                expected
            )));
        }

        let header = TgaHeader::new(image.width, image.height)?;
        output.write_all(&header.to_bytes())?;
        output.write_all(&image.data)?;
        output.flush()?;

        debug!("TGA encoding complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::tga::types::TGA_HEADER_LEN;

    #[test]
    fn test_header_layout_for_1080p() {
        let header = TgaHeader::new(1920, 1080).unwrap().to_bytes();
        let mut expected = [0u8; TGA_HEADER_LEN];
        expected[2] = 2;
        expected[12] = 0x80;
        expected[13] = 0x07;
        expected[14] = 0x38;
        expected[15] = 0x04;
        expected[16] = 24;
        expected[17] = 32;
        assert_eq!(header, expected);
    }

    #[test]
    fn test_writes_header_then_payload() {
        let image = ColorImage {
            width: 2,
            height: 1,
            data: vec![1, 2, 3, 4, 5, 6],
        };
        let mut out = Vec::new();
        StandardTgaWriter.write_image(&image, &mut out).unwrap();

        assert_eq!(out.len(), TGA_HEADER_LEN + 6);
        assert_eq!(&out[12..16], &[2, 0, 1, 0]);
        assert_eq!(&out[TGA_HEADER_LEN..], &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_rejects_dimensions_beyond_header_range() {
        let err = TgaHeader::new(70_000, 10).unwrap_err();
        assert!(matches!(err, ConversionError::EncodeError(_)));
    }

    #[test]
    fn test_rejects_short_payload() {
        let image = ColorImage {
            width: 2,
            height: 2,
            data: vec![0; 6],
        };
        let mut out = Vec::new();
        assert!(matches!(
            StandardTgaWriter.write_image(&image, &mut out),
            Err(ConversionError::EncodeError(_))
        ));
        assert!(out.is_empty());
    }
}
