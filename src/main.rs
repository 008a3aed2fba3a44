use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use sdfgen::{Algorithm, Bitmap, Classification, SdfConfig};
use std::path::PathBuf;

/// Generate a signed distance field from a black and white image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Source image, any format the `image` crate can decode
    input: PathBuf,

    /// Where to write the 8-bit distance field
    #[arg(default_value = "sdf.png")]
    output: PathBuf,

    /// TOML file with default settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Normalized intensity below which a pixel is foreground
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Classification that gets positive distances (foreground|background)
    #[arg(long)]
    inside: Option<Classification>,

    /// sweep | brute-force
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Brute force window spread
    #[arg(short, long)]
    spread: Option<usize>,

    /// Invert the image before classifying
    #[arg(short, long)]
    invert: bool,
}

impl Args {
    fn config(&self) -> Result<SdfConfig> {
        let mut config = match &self.config {
            Some(path) => SdfConfig::load(path)
                .with_context(|| format!("Failed to load config {:?}", path))?,
            None => SdfConfig::default(),
        };

        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(inside) = self.inside {
            config.inside = inside;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(spread) = self.spread {
            config.spread = spread;
        }
        config.invert |= self.invert;

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();
    let config = args.config()?;
    info!("Using {:?}", config);

    let mut luma = image::open(&args.input)
        .with_context(|| format!("Failed to load image: {:?}", args.input))?
        .to_luma8();
    if config.invert {
        image::imageops::invert(&mut luma);
    }

    let (width, height) = luma.dimensions();
    let bitmap = Bitmap::from_vec(width as usize, height as usize, luma.into_raw())
        .context("Source image is empty")?;

    let sdf = sdfgen::sdf_from_bitmap(&bitmap, &config)?;

    let out = image::GrayImage::from_raw(width, height, sdf.to_unorm8().into_vec())
        .context("Distance field does not match the source extents")?;
    out.save(&args.output)
        .with_context(|| format!("Failed to write {:?}", args.output))?;

    info!("Wrote {}x{} field to {:?}", width, height, args.output);
    Ok(())
}
