//! Renders a few synthetic shapes through both algorithms and writes the
//! resulting fields next to each other as PNGs.
//!
//! `cargo run --example shapes [--features rayon] -- [output dir]`

use anyhow::{Context, Result};
use log::info;
use sdfgen::{
    brute_force_distance, distance_field, sweep_transform, Algorithm, Bitmap, Classification,
    Grid, SdfConfig,
};
use std::path::{Path, PathBuf};

const DIMENSION: usize = 64;

type Shape = fn(f32, f32) -> bool;

fn disc(x: f32, y: f32) -> bool {
    x * x + y * y < 0.4 * 0.4
}

fn rings(x: f32, y: f32) -> bool {
    ((x * x + y * y).sqrt() * 10.0) as u32 % 2 == 0
}

fn checker(x: f32, y: f32) -> bool {
    ((x + 1.0) * 4.0) as u32 % 2 != ((y + 1.0) * 4.0) as u32 % 2
}

fn cross(x: f32, y: f32) -> bool {
    (x.abs() < 0.15 && y.abs() < 0.7) || (y.abs() < 0.15 && x.abs() < 0.7)
}

/// Dark shape on a light background, like a scanned glyph.
fn render(shape: Shape) -> Result<Bitmap<u8>> {
    let scale = 2.0 / DIMENSION as f32;
    Ok(Bitmap::from_fn(DIMENSION, DIMENSION, |x, y| {
        let px = (x as f32 + 0.5) * scale - 1.0;
        let py = (y as f32 + 0.5) * scale - 1.0;
        if shape(px, py) {
            0
        } else {
            255
        }
    })?)
}

fn save(grid: &Grid<u8>, path: &Path) -> Result<()> {
    image::GrayImage::from_raw(grid.width() as u32, grid.height() as u32, grid.as_slice().to_vec())
        .context("grid extents do not match its buffer")?
        .save(path)
        .with_context(|| format!("Failed to write {:?}", path))
}

/// Largest gap between the sweep and the exhaustive search, over every
/// cell that is not itself a site.
fn sweep_error(bitmap: &Bitmap<u8>) -> Result<f32> {
    let config = SdfConfig::default();
    let grid = config.classifier().classify(bitmap);
    let oracle = brute_force_distance(&grid, 2 * DIMENSION)?;

    let mut worst = 0.0f32;
    for target in [Classification::Foreground, Classification::Background] {
        let field = distance_field(&sweep_transform(&grid, target));
        for ((sweep, exact), class) in field
            .as_slice()
            .iter()
            .zip(oracle.as_slice())
            .zip(grid.as_slice())
        {
            if *class != target {
                worst = worst.max(sweep - exact);
            }
        }
    }
    Ok(worst)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    let shapes: [(&str, Shape); 4] = [
        ("disc", disc),
        ("rings", rings),
        ("checker", checker),
        ("cross", cross),
    ];

    for (name, shape) in shapes.iter() {
        let bitmap = render(*shape)?;
        save(&bitmap, &out_dir.join(format!("{}_source.png", name)))?;

        for algorithm in [Algorithm::Sweep, Algorithm::BruteForce] {
            let config = SdfConfig {
                algorithm,
                ..SdfConfig::default()
            };
            let sdf = sdfgen::sdf_from_bitmap(&bitmap, &config)?;
            let suffix = match algorithm {
                Algorithm::Sweep => "sweep",
                Algorithm::BruteForce => "brute",
            };
            save(&sdf.to_unorm8(), &out_dir.join(format!("{}_{}.png", name, suffix)))?;
        }

        info!("{}: worst sweep error {:.3}px", name, sweep_error(&bitmap)?);
    }

    Ok(())
}
