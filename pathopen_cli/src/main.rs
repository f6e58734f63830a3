#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageReader;
use pathopen::{normalize, Normalization, Raster};
use std::path::PathBuf;
use std::process::ExitCode;

/// Grayscale path opening by threshold decomposition.
#[derive(Parser)]
#[command(version, about)]
struct Opts {
    /// Path to the input image.
    input: PathBuf,
    /// Minimum path length to preserve.
    l: u32,
    /// Maximum number of gaps tolerated along a path.
    k: u32,
    /// Path to the output image.
    output: PathBuf,
    /// Contrast-normalize the input before path opening (`dynamic` or `static:LO:HI`).
    #[arg(long, value_parser = parse_normalization)]
    normalize: Option<Normalization>,
}

fn parse_normalization(s: &str) -> Result<Normalization, String> {
    if s == "dynamic" {
        return Ok(Normalization::Dynamic);
    }
    if let Some(rest) = s.strip_prefix("static:") {
        let (lo, hi) = rest
            .split_once(':')
            .ok_or_else(|| format!("expected static:LO:HI, got {s}"))?;
        let lo: u8 = lo.parse().map_err(|_| format!("invalid lo value {lo}"))?;
        let hi: u8 = hi.parse().map_err(|_| format!("invalid hi value {hi}"))?;
        return Ok(Normalization::Static { lo, hi });
    }
    Err(format!("expected `dynamic` or `static:LO:HI`, got {s}"))
}

fn run(opts: &Opts) -> Result<()> {
    let image = ImageReader::open(&opts.input)
        .with_context(|| format!("failed to open {}", opts.input.display()))?
        .decode()
        .with_context(|| format!("failed to decode {}", opts.input.display()))?
        .into_luma8();
    let (nx, ny) = (image.width() as usize, image.height() as usize);
    let raster = Raster::new(nx, ny, image.into_raw())?;

    let raster = match opts.normalize {
        Some(strategy) => normalize(&raster, strategy),
        None => raster,
    };

    let output = pathopen::path_open(&raster, opts.l, opts.k)?;

    let output_image = image::GrayImage::from_raw(
        u32::try_from(nx).expect("width fits in u32"),
        u32::try_from(ny).expect("height fits in u32"),
        output.into_vec(),
    )
    .context("output buffer size did not match image dimensions")?;
    output_image
        .save(&opts.output)
        .with_context(|| format!("failed to write {}", opts.output.display()))?;

    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_command() {
        use clap::CommandFactory;
        Opts::command().debug_assert();
    }

    #[test]
    fn parses_dynamic_normalization() {
        assert_eq!(parse_normalization("dynamic"), Ok(Normalization::Dynamic));
    }

    #[test]
    fn parses_static_normalization() {
        assert_eq!(
            parse_normalization("static:10:200"),
            Ok(Normalization::Static { lo: 10, hi: 200 })
        );
    }

    #[test]
    fn rejects_malformed_normalization() {
        assert!(parse_normalization("nonsense").is_err());
    }
}
