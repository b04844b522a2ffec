//! Source-selection heuristics built on the coadd MCAT.
//!
//! All distances are flat-sky Euclidean distances in degrees; the search
//! radii involved are small enough that the great-circle correction does
//! not change which source is nearest.

mod aperture;
mod average;
mod error;
mod nearest;
mod unique;

pub use aperture::{
    optimize_annulus, suggest_bg_radius, suggest_parameters, Annulus, ApertureSuggestion,
};
pub use average::{avg_sources, AveragedSource};
pub use error::SelectionError;
pub use nearest::{nearest_distinct_source, nearest_source, NearestSource};
pub use unique::{cluster_means, dedup_stable, parse_unique_sources, unique_sources};

/// Rounds to 4 decimal places (0.36 arcsec at degree scale).
pub(crate) fn round4(x: f64) -> f64 {
    (x * 1.0e4).round() / 1.0e4
}
