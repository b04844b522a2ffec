//! galexdb - exposure windows, effective exposure and source selection for
//! GALEX photometry.
//!
//! The crate sits on top of an external query layer (see [`query`]) and
//! derives analysis-ready quantities from its tables:
//!
//! - [`windows`]: contiguous exposure windows reconstructed from timestamp
//!   streams.
//! - [`exposure`]: dead-time and shutter corrected exposure, integrated in
//!   bounded chunks.
//! - [`catalog`]: MCAT magnitudes with zero-points applied, sky background,
//!   aspect solutions.
//! - [`selection`]: nearest sources, unique-source parsing and
//!   aperture/annulus suggestions.
//!
//! Everything is synchronous; each call blocks on its adapter queries.

pub mod catalog;
pub mod config;
pub mod exposure;
pub mod query;
pub mod selection;
pub mod units;
pub mod windows;

pub use config::{Config, ConfigError, ExposureConfig, SelectionConfig, WindowPolicy, ZeroPoints};
pub use query::{Band, QueryAdapter, QueryError, QueryOptions, SkyPosition};
