//! Compression configuration and validation.
//!
//! This is the CLI-facing form: it accepts whatever the user typed, and
//! `validate()` turns range mistakes into messages before any pixels move.
//!
//! | Parameter       | Range        | Notes                                  |
//! |-----------------|--------------|----------------------------------------|
//! | `quality`       | 0–100        | ignored for PNG and lossless WebP      |
//! | `max_long_side` | ≥ 1 if set   | aspect-preserving clamp, no upscaling  |

use crate::codec::OutputFormat;
use crate::CompressOptions;

/// Configuration for one compression run, before validation.
#[derive(Debug, Clone)]
pub struct CompressConfig {
    /// Target encoding.
    pub format: OutputFormat,
    /// Encoder quality, 0–100.
    pub quality: f32,
    /// Lossless WebP instead of lossy.
    pub lossless: bool,
    /// Optional longest-side clamp in pixels.
    pub max_long_side: Option<u32>,
}

impl Default for CompressConfig {
    /// WebP at quality 75 with no resize, the same default trade-off the
    /// web app ships with.
    fn default() -> Self {
        Self {
            format: OutputFormat::Webp,
            quality: 75.0,
            lossless: false,
            max_long_side: None,
        }
    }
}

impl CompressConfig {
    pub fn new(
        format: OutputFormat,
        quality: f32,
        lossless: bool,
        max_long_side: Option<u32>,
    ) -> Self {
        Self {
            format,
            quality,
            lossless,
            max_long_side,
        }
    }

    /// Range-check the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.quality) {
            return Err("Quality must be between 0 and 100".to_string());
        }
        if self.max_long_side == Some(0) {
            return Err("Max side must be greater than 0 pixels".to_string());
        }
        if self.lossless && self.format != OutputFormat::Webp {
            return Err("Lossless mode is only available for WebP output".to_string());
        }
        Ok(())
    }

    /// Convert to the library's options struct.
    pub fn to_options(&self) -> CompressOptions {
        CompressOptions {
            format: self.format,
            quality: self.quality,
            lossless: self.lossless,
            max_long_side: self.max_long_side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompressConfig::default();
        assert_eq!(config.format, OutputFormat::Webp);
        assert_eq!(config.quality, 75.0);
        assert!(!config.lossless);
        assert_eq!(config.max_long_side, None);
    }

    #[test]
    fn test_config_validation() {
        let mut config = CompressConfig::default();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Quality out of range
        config.quality = 101.0;
        assert!(config.validate().is_err());
        config.quality = -1.0;
        assert!(config.validate().is_err());
        config.quality = 75.0; // Reset

        // Zero-pixel resize target
        config.max_long_side = Some(0);
        assert!(config.validate().is_err());
        config.max_long_side = Some(1024); // Reset

        // Lossless only makes sense for WebP
        config.lossless = true;
        config.format = OutputFormat::Jpeg;
        assert!(config.validate().is_err());
        config.format = OutputFormat::Webp;

        // Valid again
        assert!(config.validate().is_ok());
    }
}
