//! Resize planning and execution.
//!
//! Planning is pure geometry: a [`ScalePlan`] is computed up front from the
//! input size, the target, and the fit mode, then executed in one shot with
//! `fast_image_resize` over tightly-packed RGBA8. Aspect-preserving plans
//! never upscale.

use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::U8x4;
use fir::{ResizeOptions, Resizer};
use image::RgbaImage;

/// Pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

/// What to scale towards.
#[derive(Clone, Copy, Debug)]
pub enum ScaleTarget {
    /// Clamp the longest side to N pixels; the other side is derived.
    MaxLongSide(u32),
    /// Fit into (or stretch to) an exact box.
    Exact(Size),
}

/// How to reconcile the input aspect ratio with the target.
#[derive(Clone, Copy, Debug)]
pub enum FitMode {
    /// Keep aspect; output fits inside the target, never upscaled.
    Contain,
    /// Match the target exactly, distorting aspect if needed.
    Stretch,
}

/// A computed resize: input dimensions plus the final output dimensions.
#[derive(Clone, Copy, Debug)]
pub struct ScalePlan {
    pub input: Size,
    pub out: Size,
}

/// Compute the output geometry for `input` under `target` and `fit`.
///
/// ```rust
/// use memopress::scale::{build_plan, FitMode, ScaleTarget, Size};
///
/// let plan = build_plan(
///     Size { w: 1920, h: 1080 },
///     ScaleTarget::MaxLongSide(640),
///     FitMode::Contain,
/// );
/// assert_eq!(plan.out, Size { w: 640, h: 360 });
/// ```
pub fn build_plan(input: Size, target: ScaleTarget, fit: FitMode) -> ScalePlan {
    let out = match (target, fit) {
        (ScaleTarget::MaxLongSide(max_side), FitMode::Contain) => fit_long_side(input, max_side),
        (ScaleTarget::MaxLongSide(max_side), FitMode::Stretch) => Size {
            w: max_side,
            h: max_side,
        },
        (ScaleTarget::Exact(box_), FitMode::Contain) => fit_within(input, box_),
        (ScaleTarget::Exact(box_), FitMode::Stretch) => box_,
    };
    ScalePlan { input, out }
}

fn fit_long_side(input: Size, max_long: u32) -> Size {
    let (w, h) = (input.w as f64, input.h as f64);
    let long = w.max(h);
    let s = (max_long as f64 / long).min(1.0); // don't upscale
    Size {
        w: ((w * s).round() as u32).max(1),
        h: ((h * s).round() as u32).max(1),
    }
}

fn fit_within(input: Size, box_: Size) -> Size {
    let (w, h) = (input.w as f64, input.h as f64);
    let (bw, bh) = (box_.w as f64, box_.h as f64);
    let s = (bw / w).min(bh / h).min(1.0);
    Size {
        w: ((w * s).round() as u32).max(1),
        h: ((h * s).round() as u32).max(1),
    }
}

#[derive(Debug)]
pub enum ScaleError {
    /// Source buffer length disagrees with the plan's input dimensions.
    InputMismatch,
    Fir(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
}

impl From<fir::ResizeError> for ScaleError {
    fn from(e: fir::ResizeError) -> Self {
        Self::Fir(e)
    }
}
impl From<fir::ImageBufferError> for ScaleError {
    fn from(e: fir::ImageBufferError) -> Self {
        Self::ImageBuf(e)
    }
}

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::InputMismatch => write!(f, "source buffer does not match plan input size"),
            ScaleError::Fir(e) => write!(f, "resize error: {}", e),
            ScaleError::ImageBuf(e) => write!(f, "image buffer error: {}", e),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::Fir(e) => Some(e),
            ScaleError::ImageBuf(e) => Some(e),
            _ => None,
        }
    }
}

/// Execute `plan` over a tightly-packed RGBA image.
pub fn resize_rgba(src: &RgbaImage, plan: &ScalePlan) -> Result<RgbaImage, ScaleError> {
    if src.width() != plan.input.w || src.height() != plan.input.h {
        return Err(ScaleError::InputMismatch);
    }

    let src_view = TypedImageRef::<U8x4>::from_buffer(plan.input.w, plan.input.h, src.as_raw())?;
    let mut dst = vec![0u8; (plan.out.w as usize) * (plan.out.h as usize) * 4];
    let mut dst_image = TypedImage::<U8x4>::from_buffer(plan.out.w, plan.out.h, &mut dst)?;

    let opts = ResizeOptions::new().use_alpha(true);
    let mut resizer = Resizer::new();
    resizer.resize_typed::<U8x4>(&src_view, &mut dst_image, &opts)?;

    // from_raw only fails on a length mismatch, which the sizing above rules out
    RgbaImage::from_raw(plan.out.w, plan.out.h, dst).ok_or(ScaleError::InputMismatch)
}
