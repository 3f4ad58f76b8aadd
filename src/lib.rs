//! # memopress
//!
//! Compress an image and, optionally, post the result to a self-hosted
//! [Memos](https://usememos.com) instance.
//!
//! ## Architecture
//!
//! The library is organized into a handful of small modules:
//! - `config`: compression options with validation, plus the persisted
//!   settings file (API URL, token, auto-upload flag)
//! - `scale`: resize planning and SIMD-accelerated execution
//! - `codec`: WebP/JPEG/PNG encoding and the MIME/extension tables
//! - `naming`: upload filename sanitization, validation, and defaults
//! - `report`: human-readable before/after size reporting
//!
//! The Memos REST client lives in the sibling `memos-api` crate; this crate
//! produces the bytes and the metadata (filename, MIME type) that the client
//! ships.
//!
//! ## Example
//!
//! ```rust,no_run
//! use memopress::{compress_image, CompressOptions};
//! use memopress::codec::OutputFormat;
//!
//! # fn example() -> anyhow::Result<()> {
//! let input = std::fs::read("photo.png")?;
//! let options = CompressOptions {
//!     format: OutputFormat::Webp,
//!     quality: 75.0,
//!     lossless: false,
//!     max_long_side: Some(1920),
//! };
//! let outcome = compress_image(&input, &options)?;
//! std::fs::write("photo.webp", &outcome.bytes)?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};

pub mod codec;
pub mod config;
pub mod naming;
pub mod report;
pub mod scale;

use codec::{EncodeOptions, OutputFormat};
use scale::{FitMode, ScaleTarget, Size};

/// Options for one compression run.
///
/// This is the validated, ready-to-run form; the CLI builds it from a
/// [`config::CompressConfig`] after `validate()` has passed.
#[derive(Debug, Clone)]
pub struct CompressOptions {
    /// Target encoding.
    pub format: OutputFormat,
    /// Encoder quality, 0–100. Ignored for PNG and for lossless WebP.
    pub quality: f32,
    /// Lossless WebP instead of lossy. Only meaningful for WebP.
    pub lossless: bool,
    /// Clamp the longest side to this many pixels before encoding.
    /// Aspect-preserving; never upscales.
    pub max_long_side: Option<u32>,
}

/// What a compression run produced.
#[derive(Debug)]
pub struct CompressOutcome {
    /// The encoded image.
    pub bytes: Vec<u8>,
    /// Output dimensions after any resize.
    pub width: u32,
    pub height: u32,
}

/// Decode `input`, apply the optional downscale, and encode it per `options`.
pub fn compress_image(input: &[u8], options: &CompressOptions) -> Result<CompressOutcome> {
    let decoded = image::load_from_memory(input).context("decoding input image")?;
    let mut rgba = decoded.to_rgba8();

    if let Some(max_side) = options.max_long_side {
        let input_size = Size {
            w: rgba.width(),
            h: rgba.height(),
        };
        let plan = scale::build_plan(
            input_size,
            ScaleTarget::MaxLongSide(max_side),
            FitMode::Contain,
        );
        if plan.out != plan.input {
            tracing::debug!(
                from = %format_args!("{}x{}", plan.input.w, plan.input.h),
                to = %format_args!("{}x{}", plan.out.w, plan.out.h),
                "downscaling"
            );
            rgba = scale::resize_rgba(&rgba, &plan).context("resizing image")?;
        }
    }

    let (width, height) = rgba.dimensions();
    let bytes = codec::encode(
        &rgba,
        options.format,
        &EncodeOptions {
            quality: options.quality,
            lossless: options.lossless,
        },
    )
    .context("encoding image")?;

    Ok(CompressOutcome {
        bytes,
        width,
        height,
    })
}
