//! Output encoders and the format ↔ MIME ↔ extension tables.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Webp,
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Canonical file extension (note `jpg`, not `jpeg`).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Webp => "image/webp",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

/// MIME type for a lowercase file extension, covering the formats the
/// original service knows about; anything else is an octet stream.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "avif" => "image/avif",
        "webp" => "image/webp",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "jxl" => "image/jxl",
        "wp2" => "image/webp2",
        "qoi" => "image/qoi",
        _ => "application/octet-stream",
    }
}

/// Encoder knobs shared across formats.
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// 0–100. Ignored for PNG; for JPEG it is rounded and clamped to 1–100.
    pub quality: f32,
    /// Lossless WebP. Ignored for JPEG/PNG.
    pub lossless: bool,
}

/// Encode a tightly-packed RGBA image to `format`.
pub fn encode(image: &RgbaImage, format: OutputFormat, opts: &EncodeOptions) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Webp => encode_webp(image, opts),
        OutputFormat::Jpeg => encode_jpeg(image, opts),
        OutputFormat::Png => encode_png(image),
    }
}

fn encode_webp(image: &RgbaImage, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    let encoder = webp::Encoder::from_rgba(image.as_raw(), width, height);
    let memory = if opts.lossless {
        encoder.encode_lossless()
    } else {
        encoder.encode(opts.quality)
    };
    Ok(memory.to_vec())
}

fn encode_jpeg(image: &RgbaImage, opts: &EncodeOptions) -> Result<Vec<u8>> {
    // JPEG has no alpha channel; flatten first.
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let quality = opts.quality.round().clamp(1.0, 100.0) as u8;
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut Cursor::new(&mut buf), quality)
        .encode_image(&rgb)
        .context("jpeg encode")?;
    Ok(buf)
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("png encode")?;
    Ok(buf)
}
