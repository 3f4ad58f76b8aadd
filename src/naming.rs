//! Upload filename handling: sanitization, validation, and defaults.
//!
//! The accepted charset matches the note service's rule: CJK ideographs
//! (U+4E00..U+9FA5), ASCII letters and digits, underscore, and hyphen.
//! Rejections name the first offending character and its 1-based position so
//! the user can fix it without guessing.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;

fn valid_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[\x{4e00}-\x{9fa5}A-Za-z0-9_-]+$").expect("valid name pattern")
    })
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Why a name was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    Empty,
    InvalidChar {
        ch: char,
        /// 1-based character position.
        position: usize,
    },
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::Empty => write!(f, "file name must not be empty"),
            NameError::InvalidChar { ch, position } => write!(
                f,
                "file name contains invalid character {:?} at position {}; \
                 allowed: CJK, letters, digits, underscore, hyphen",
                ch, position
            ),
        }
    }
}

impl std::error::Error for NameError {}

/// Trim and collapse runs of whitespace to a single `_`.
pub fn sanitize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Quick whole-string check against the accepted charset.
pub fn is_valid(name: &str) -> bool {
    valid_name_pattern().is_match(name)
}

/// Validate a sanitized name, pinpointing the first offending character.
pub fn validate(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    for (i, ch) in name.chars().enumerate() {
        if !is_allowed_char(ch) {
            return Err(NameError::InvalidChar {
                ch,
                position: i + 1,
            });
        }
    }
    Ok(())
}

/// Default upload stem: `YYYYMMDD_<input stem>`, sanitized.
pub fn default_stem(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    format!("{}_{}", Local::now().format("%Y%m%d"), sanitize(&stem))
}

/// Lowercase extension of `source`, or `bin` when it has none.
pub fn extension_of(source: &Path) -> String {
    source
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}
