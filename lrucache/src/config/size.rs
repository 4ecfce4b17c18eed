//! Human-readable size parsing (e.g., "2GB", "500MB").

use std::fmt;
use thiserror::Error;

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

/// Error parsing a size string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid size '{input}' - expected format like '2GB', '500MB', or '1024KB'")]
pub struct SizeParseError {
    input: String,
}

impl SizeParseError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports:
/// - Bare numbers (treated as bytes)
/// - KB/K suffix (1024 bytes)
/// - MB/M suffix (1024² bytes)
/// - GB/G suffix (1024³ bytes)
/// - Case-insensitive
/// - Whitespace tolerant
///
/// # Examples
///
/// ```
/// use lrucache::config::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1024);
/// assert_eq!(parse_size("1 KB").unwrap(), 1024);
/// assert_eq!(parse_size("64MB").unwrap(), 64 * 1024 * 1024);
/// assert_eq!(parse_size("2g").unwrap(), 2 * 1024 * 1024 * 1024);
/// ```
pub fn parse_size(s: &str) -> Result<u64, SizeParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(SizeParseError::new(trimmed));
    }

    let upper = trimmed.to_ascii_uppercase();
    let (suffix_len, multiplier) = [
        ("GB", GB),
        ("G", GB),
        ("MB", MB),
        ("M", MB),
        ("KB", KB),
        ("K", KB),
    ]
    .into_iter()
    .find(|(suffix, _)| upper.ends_with(*suffix))
    .map_or((0, 1), |(suffix, multiplier)| (suffix.len(), multiplier));

    // Suffixes are ASCII, so slicing by byte length stays on a char boundary
    let num_str = trimmed[..trimmed.len() - suffix_len].trim();

    let num: u64 = num_str.parse().map_err(|_| SizeParseError::new(trimmed))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| SizeParseError::new(trimmed))
}

/// Format a byte count as a human-readable string.
///
/// Uses the largest unit that divides the value exactly.
///
/// # Examples
///
/// ```
/// use lrucache::config::format_size;
///
/// assert_eq!(format_size(1024), "1KB");
/// assert_eq!(format_size(64 * 1024 * 1024), "64MB");
/// assert_eq!(format_size(1000), "1000");
/// ```
pub fn format_size(bytes: u64) -> String {
    [("GB", GB), ("MB", MB), ("KB", KB)]
        .into_iter()
        .find(|(_, unit)| bytes >= *unit && bytes.is_multiple_of(*unit))
        .map_or_else(
            || bytes.to_string(),
            |(suffix, unit)| format!("{}{suffix}", bytes / unit),
        )
}

/// A byte size that can be parsed from and formatted to human-readable strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size(pub u64);

impl Size {
    pub fn bytes(self) -> u64 {
        self.0
    }

    /// `kb` kibibytes, or `None` if that does not fit in a `u64`.
    pub fn from_kb(kb: u64) -> Option<Self> {
        kb.checked_mul(KB).map(Self)
    }

    /// `mb` mebibytes, or `None` if that does not fit in a `u64`.
    pub fn from_mb(mb: u64) -> Option<Self> {
        mb.checked_mul(MB).map(Self)
    }

    /// `gb` gibibytes, or `None` if that does not fit in a `u64`.
    pub fn from_gb(gb: u64) -> Option<Self> {
        gb.checked_mul(GB).map(Self)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_size(self.0))
    }
}

impl std::str::FromStr for Size {
    type Err = SizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_size(s).map(Size)
    }
}

impl From<Size> for u64 {
    fn from(size: Size) -> u64 {
        size.0
    }
}
