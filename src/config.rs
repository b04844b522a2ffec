//! Immutable configuration passed explicitly to each operation.
//!
//! Every struct has a `Default` carrying the standard GALEX values. With the
//! `serde` feature the whole [`Config`] can be read from TOML; missing keys
//! fall back to the defaults.

use thiserror::Error;

use crate::query::{Band, QueryOptions};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Photometric zero-point magnitudes per band.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZeroPoints {
    pub nuv: f64,
    pub fuv: f64,
}

impl ZeroPoints {
    pub const fn for_band(&self, band: Band) -> f64 {
        match band {
            Band::Nuv => self.nuv,
            Band::Fuv => self.fuv,
        }
    }
}

impl Default for ZeroPoints {
    fn default() -> Self {
        Self {
            nuv: 20.08,
            fuv: 18.82,
        }
    }
}

/// Policy for reconstructing contiguous exposure windows.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowPolicy {
    /// Gaps longer than this (seconds) start a new window.
    pub maxgap: f64,
    /// Windows shorter than this (seconds) are dropped.
    pub minexp: f64,
    /// Detector diameter in degrees.
    pub detsize: f64,
    /// Scale between stored timestamps and seconds.
    pub tscale: f64,
    /// Reconstruct from aspect solutions instead of recorded exposure.
    pub predicted: bool,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            maxgap: 1.0,
            minexp: 1.0,
            detsize: 1.25,
            tscale: 1000.0,
            predicted: false,
        }
    }
}

/// Chunking used by the effective-exposure integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExposureConfig {
    /// Largest time span (seconds) integrated by a single dead-time query.
    pub chunk_size: f64,
    pub windows: WindowPolicy,
}

impl ExposureConfig {
    pub const DEFAULT_CHUNK_SIZE: f64 = 10.0e6;

    /// Rejects a chunk size or window policy the integrator cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = &self.windows;
        let checks: [(&'static str, f64, bool); 5] = [
            ("exposure.chunk_size", self.chunk_size, self.chunk_size.is_finite() && self.chunk_size > 0.0),
            ("exposure.windows.maxgap", windows.maxgap, windows.maxgap >= 0.0),
            ("exposure.windows.minexp", windows.minexp, windows.minexp >= 0.0),
            ("exposure.windows.tscale", windows.tscale, windows.tscale > 0.0),
            ("exposure.windows.detsize", windows.detsize, windows.detsize > 0.0),
        ];
        match checks.into_iter().find(|(_, _, ok)| !ok) {
            Some((field, value, _)) => Err(ConfigError::InvalidValue { field, value }),
            None => Ok(()),
        }
    }
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            windows: WindowPolicy::default(),
        }
    }
}

/// Radii and limits used by the source-selection heuristics, in degrees
/// and AB magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectionConfig {
    pub maglimit: f64,
    /// Search radius for the nearest source.
    pub nearest_radius: f64,
    /// Search radius for the nearest distinct (background) source.
    pub distinct_radius: f64,
    /// Radius used to average near-duplicate catalog entries.
    pub avg_radius: f64,
    /// Candidates closer than this to the target are the target itself.
    pub distinct_margin: f64,
    /// Radius returned when no source is found.
    pub fallback_radius: f64,
    /// Clustering margin for unique-source parsing.
    pub unique_margin: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            maglimit: 22.0,
            nearest_radius: 0.01,
            distinct_radius: 0.1,
            avg_radius: 0.001,
            distinct_margin: 0.005,
            fallback_radius: 0.01,
            unique_margin: 0.005,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    pub query: QueryOptions,
    pub zero_points: ZeroPoints,
    pub exposure: ExposureConfig,
    pub selection: SelectionConfig,
}

impl Config {
    /// Checks value ranges that would make the algorithms meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.exposure.validate()
    }

    /// Parses and validates a TOML document.
    ///
    /// ```
    /// let cfg = galexdb::Config::from_toml_str("[zero_points]\nnuv = 20.0\n").unwrap();
    /// assert_eq!(cfg.zero_points.nuv, 20.0);
    /// assert_eq!(cfg.zero_points.fuv, 18.82);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
