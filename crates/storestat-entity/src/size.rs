//! Human-readable size formatting for usage figures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bytes in one megabyte (binary).
pub const BYTES_PER_MB: i64 = 1_048_576;

/// Bytes in one gigabyte (binary).
pub const BYTES_PER_GB: i64 = 1_073_741_824;

/// Display unit for a byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    /// Whole megabytes.
    #[default]
    Mb,
    /// Gigabytes with two decimals.
    Gb,
}

impl SizeUnit {
    /// Parse a unit name. Anything other than `gb` (any case) means megabytes.
    pub fn parse_lossy(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("gb") {
            Self::Gb
        } else {
            Self::Mb
        }
    }

    /// Unit label used next to formatted values.
    pub fn label(self) -> &'static str {
        match self {
            Self::Mb => "MB",
            Self::Gb => "GB",
        }
    }
}

impl FromStr for SizeUnit {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lossy(s))
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mb => write!(f, "mb"),
            Self::Gb => write!(f, "gb"),
        }
    }
}

/// Round a byte count to the nearest whole megabyte (halves away from zero).
pub fn megabytes(bytes: i64) -> i64 {
    (bytes as f64 / BYTES_PER_MB as f64).round() as i64
}

/// Format a byte count in the given unit, without the unit label.
///
/// Megabytes are rounded to a whole number; gigabytes always carry exactly
/// two decimals and never a thousands separator.
pub fn format_size(bytes: i64, unit: SizeUnit) -> String {
    match unit {
        SizeUnit::Mb => megabytes(bytes).to_string(),
        SizeUnit::Gb => {
            let gigabytes = bytes as f64 / BYTES_PER_GB as f64;
            format!("{:.2}", (gigabytes * 100.0).round() / 100.0)
        }
    }
}

/// Format a byte count followed by its unit label, e.g. `"12 MB"`.
pub fn format_size_labeled(bytes: i64, unit: SizeUnit) -> String {
    format!("{} {}", format_size(bytes, unit), unit.label())
}
