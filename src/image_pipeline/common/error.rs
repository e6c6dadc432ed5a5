use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Input frame size mismatch: expected {expected} bytes, got {got}")]
    InputSizeMismatch { expected: usize, got: usize },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported sample depth: {0} bits (expected 1 to 16)")]
    UnsupportedSampleDepth(u32),

    #[error("Sample {value} at offset {offset} exceeds the sensor maximum {max}")]
    SampleOutOfRange { offset: usize, value: u16, max: u16 },

    #[error("Cannot normalize frame with degenerate range: min={min}, max={max}")]
    DegenerateRange { min: u16, max: u16 },

    #[error("Failed to encode TGA image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
