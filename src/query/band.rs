//! GALEX detector bands.

use std::fmt;
use std::str::FromStr;

/// One of the two GALEX detector bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Band {
    /// Near ultraviolet.
    Nuv,
    /// Far ultraviolet.
    Fuv,
}

impl Band {
    pub const fn as_str(self) -> &'static str {
        match self {
            Band::Nuv => "NUV",
            Band::Fuv => "FUV",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown band name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown band: {0} (expected NUV or FUV)")]
pub struct UnknownBand(pub String);

impl FromStr for Band {
    type Err = UnknownBand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NUV" => Ok(Band::Nuv),
            "FUV" => Ok(Band::Fuv),
            _ => Err(UnknownBand(s.to_string())),
        }
    }
}
