//! Before/after size reporting.
//!
//! Formatting matches the web app's results bubble: 1000-based units with
//! three significant figures, and a percent delta computed from the
//! after/before ratio.

use std::fmt;

const UNITS: [&str; 6] = ["B", "kB", "MB", "GB", "TB", "PB"];

/// A byte count broken into a display value and unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrettyBytes {
    pub value: f64,
    pub unit: &'static str,
}

impl fmt::Display for PrettyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Format `size` with 1000-based units and 3 significant figures.
///
/// ```rust
/// use memopress::report::pretty_bytes;
///
/// assert_eq!(pretty_bytes(999).to_string(), "999 B");
/// assert_eq!(pretty_bytes(1337).to_string(), "1.34 kB");
/// ```
pub fn pretty_bytes(size: u64) -> PrettyBytes {
    if size < 1000 {
        return PrettyBytes {
            value: size as f64,
            unit: "B",
        };
    }
    let exponent = (((size as f64).log10() / 3.0).floor() as usize).min(UNITS.len() - 1);
    let value = to_precision(size as f64 / 1000f64.powi(exponent as i32), 3);
    PrettyBytes {
        value,
        unit: UNITS[exponent],
    }
}

fn to_precision(v: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits - 1 - v.abs().log10().floor() as i32);
    (v * factor).round() / factor
}

/// Which way the size moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeDirection {
    Smaller,
    Larger,
}

/// Percent delta between an original and a compressed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeDelta {
    pub percent: u32,
    /// `None` when the sizes are equal (or the original is empty).
    pub direction: Option<SizeDirection>,
}

/// Percent math from the results panel: the ratio is rounded to whole
/// percent first, then folded into a distance from 100%.
pub fn size_delta(before: u64, after: u64) -> SizeDelta {
    if before == 0 {
        return SizeDelta {
            percent: 0,
            direction: None,
        };
    }
    let ratio = after as f64 / before as f64;
    let absolute = (ratio * 100.0).round() as i64;
    if absolute == 100 {
        SizeDelta {
            percent: 0,
            direction: None,
        }
    } else if absolute > 100 {
        SizeDelta {
            percent: (absolute - 100) as u32,
            direction: Some(SizeDirection::Larger),
        }
    } else {
        SizeDelta {
            percent: (100 - absolute) as u32,
            direction: Some(SizeDirection::Smaller),
        }
    }
}

/// One-line before/after summary, e.g. `2.40 MB → 512 kB (↓ 79%)`.
pub fn format_report(before: u64, after: u64) -> String {
    let delta = size_delta(before, after);
    let suffix = match delta.direction {
        Some(SizeDirection::Smaller) => format!("(↓ {}%)", delta.percent),
        Some(SizeDirection::Larger) => format!("(↑ {}%)", delta.percent),
        None => "(0%)".to_string(),
    };
    format!(
        "{} → {} {}",
        pretty_bytes(before),
        pretty_bytes(after),
        suffix
    )
}
