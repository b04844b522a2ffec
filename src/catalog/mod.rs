//! MCAT catalog aggregation and aspect retrieval.

mod aspect;
mod error;
mod mags;
mod skybg;

pub use aspect::get_aspect;
pub use error::CatalogError;
pub use mags::{get_mags, BandMagnitudes, CatalogMode, MagnitudeResult, MagnitudeTable};
pub use skybg::mcat_skybg;
