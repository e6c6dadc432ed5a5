use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rg10_tga_rs::image_pipeline::{ConversionConfig, Quantization, Rg10ToTgaPipeline, SensorConfig};
use rg10_tga_rs::logger;

use tracing::{error, info};

/// Convert one RG10 Bayer frame into a 24 bit TGA image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Raw RG10 frame (16 bit little-endian samples)
    input: PathBuf,

    /// Destination TGA file
    output: PathBuf,

    /// Output width in pixels (one 2x2 block per pixel)
    #[arg(long, default_value_t = SensorConfig::IMX477_1080P.width)]
    width: usize,

    /// Output height in pixels
    #[arg(long, default_value_t = SensorConfig::IMX477_1080P.height)]
    height: usize,

    /// Significant bits per sample
    #[arg(long, default_value_t = SensorConfig::IMX477_1080P.sample_bits,
          value_parser = clap::value_parser!(u32).range(1..=16))]
    sample_bits: u32,

    /// Skip stretching the sample range before debayering
    #[arg(long, default_value_t = false)]
    no_normalize: bool,

    /// Truncate instead of rounding when reducing to 8 bits
    #[arg(long, default_value_t = false)]
    truncate: bool,

    /// Debayer rows in parallel
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Print per-stage timings when done
    #[arg(long, default_value_t = false)]
    timings: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    info!("Starting rg10_tga...");

    let config = ConversionConfig::builder()
        .sensor(SensorConfig::new(args.width, args.height, args.sample_bits))
        .normalize(!args.no_normalize)
        .quantization(if args.truncate {
            Quantization::Truncate
        } else {
            Quantization::Nearest
        })
        .parallel(args.parallel)
        .build();
    let pipeline = Rg10ToTgaPipeline::new(config);

    info!(
        "Sensor: {}x{} blocks, {} bit samples ({} bytes per frame)",
        pipeline.config().sensor.width,
        pipeline.config().sensor.height,
        pipeline.config().sensor.sample_bits,
        pipeline.config().sensor.frame_bytes()
    );
    info!(
        "Normalization: {}",
        if pipeline.config().normalize {
            "enabled"
        } else {
            "disabled"
        }
    );

    match pipeline.convert_file_with_timings(&args.input, &args.output) {
        Ok(timings) => {
            info!("Conversion successful!");
            if args.timings {
                println!("{}", timings.summary());
            }
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            Err(e).with_context(|| {
                format!("converting {} to {}", args.input.display(), args.output.display())
            })
        }
    }
}
