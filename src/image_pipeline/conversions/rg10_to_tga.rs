use tracing::{debug, info, instrument, warn};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::{
        error::{ConversionError, Result},
        timing::{PipelineTimings, Timer},
    },
    debayer::{self, ColorImage, CpuDebayer, RangeStats},
    raw::{FrameReader, MosaicFrame, Rg10Reader, SensorConfig},
    tga::{ConversionConfig, ImageWriter, StandardTgaWriter, TGA_MAX_DIMENSION},
};

pub struct Rg10ToTgaPipeline<R: FrameReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl Rg10ToTgaPipeline<Rg10Reader, StandardTgaWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: Rg10Reader,
            writer: StandardTgaWriter,
            config,
        }
    }
}

impl<R: FrameReader, W: ImageWriter> Rg10ToTgaPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, sensor: &SensorConfig) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        let (width, height) = (sensor.width, sensor.height);
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if width > TGA_MAX_DIMENSION || height > TGA_MAX_DIMENSION {
            warn!(
                "Image dimensions {}x{} exceed the TGA maximum {}",
                width, height, TGA_MAX_DIMENSION
            );
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if !sensor.has_valid_depth() {
            return Err(ConversionError::UnsupportedSampleDepth(sensor.sample_bits));
        }

        Ok(())
    }

    /// Measures the range of `frame` and, when enabled, stretches it in place.
    ///
    /// The returned statistics always describe the frame as it was read.
    fn normalize_stage(&self, frame: &mut MosaicFrame, timings: &mut PipelineTimings) -> Result<RangeStats> {
        let stats = {
            let _span = tracing::info_span!("compute_range").entered();
            let timer = Timer::start("compute_range");
            let stats = debayer::compute_range(frame);
            timings.record(timer);
            stats
        };
        debug!(min = stats.min, max = stats.max, "Frame range");

        if self.config.normalize {
            let _span = tracing::info_span!("normalize").entered();
            let timer = Timer::start("normalize");
            debayer::normalize_with(frame, stats)?;
            timings.record(timer);
        }

        Ok(stats)
    }

    /// Runs every in-memory stage and returns the debayered image.
    pub fn process(&self, input_data: &[u8]) -> Result<ColorImage> {
        let mut timings = PipelineTimings::new();
        self.process_timed(input_data, &mut timings)
    }

    fn process_timed(&self, input_data: &[u8], timings: &mut PipelineTimings) -> Result<ColorImage> {
        let sensor = self.config.sensor;

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = sensor.width,
                height = sensor.height
            ).entered();
            let timer = Timer::start("validate_dimensions");
            self.validate_dimensions(&sensor)?;
            timings.record(timer);
        }

        let mut frame = {
            let _span = tracing::info_span!("decode_rg10").entered();
            let timer = Timer::start("decode_rg10");
            let frame = self.reader.read_frame(input_data, &sensor)?;
            timings.record(timer);
            frame
        };

        self.normalize_stage(&mut frame, timings)?;

        let image = {
            let _span = tracing::info_span!("debayer").entered();
            let timer = Timer::start("debayer");
            let image = CpuDebayer::new(self.config.quantization)
                .parallel(self.config.parallel)
                .process(&frame);
            timings.record(timer);
            image
        };

        Ok(image)
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(input_data, output).map(|_| ())
    }

    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting RG10 to TGA conversion");

        let image = self.process_timed(input_data, &mut timings)?;
        self.encode_timed(&image, output, &mut timings)?;

        info!(
            width = image.width,
            height = image.height,
            elapsed_ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Conversion complete"
        );
        Ok(timings)
    }

    fn encode_timed(&self, image: &ColorImage, output: &mut dyn Write, timings: &mut PipelineTimings) -> Result<()> {
        let _span = tracing::info_span!("encode_tga").entered();
        let timer = Timer::start("encode_tga");
        self.writer.write_image(image, output)?;
        timings.record(timer);
        Ok(())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        self.convert_file_with_timings(input_path, output_path).map(|_| ())
    }

    pub fn convert_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            let timer = Timer::start("read_input_file");
            let data = std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?;
            timings.record(timer);
            data
        };

        info!("Starting RG10 to TGA conversion");
        let image = self.process_timed(&input_data, &mut timings)?;

        // The output only appears once there is an image to put in it.
        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            let timer = Timer::start("create_output_file");
            let file = std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
            timings.record(timer);
            std::io::BufWriter::new(file)
        };

        if let Err(e) = self.encode_timed(&image, &mut output_file, &mut timings) {
            drop(output_file);
            if let Err(remove_err) = std::fs::remove_file(output_path) {
                warn!("Could not remove partial output {}: {}", output_path.display(), remove_err);
            }
            return Err(e);
        }

        info!(
            width = image.width,
            height = image.height,
            elapsed_ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Conversion complete"
        );
        Ok(timings)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
