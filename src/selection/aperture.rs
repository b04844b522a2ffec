//! Aperture and background-annulus suggestions.

use log::{info, warn};

use super::nearest::{nearest_distinct_source, nearest_source};
use super::{round4, SelectionError};
use crate::config::SelectionConfig;
use crate::query::{Band, QueryAdapter, QueryOptions, SkyPosition};

/// Background annulus bounds in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annulus {
    pub inner: f64,
    pub outer: f64,
    /// Known sources fall inside the suggested annulus.
    pub overlaps_sources: bool,
}

/// Suggested photometry parameters for a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApertureSuggestion {
    pub position: SkyPosition,
    /// Aperture radius in degrees.
    pub radius: f64,
    pub annulus: Annulus,
}

/// Distance to the nearest distinct source minus three of its FWHM.
///
/// The result is the largest background radius that stays clear of the
/// neighbour. It is negative in crowded fields, meaning there is no clean
/// background region.
pub fn suggest_bg_radius(
    adapter: &dyn QueryAdapter,
    band: Band,
    position: SkyPosition,
    config: &SelectionConfig,
    opts: &QueryOptions,
) -> Result<f64, SelectionError> {
    let nearest = nearest_distinct_source(adapter, band, position, config, opts)?;
    let dist = position.distance_to(&nearest.position());
    Ok(round4(dist - 3.0 * nearest.fwhm(band)))
}

/// Annulus `[1.2, 2] × optrad` around an aperture of radius `optrad`.
///
/// When `outann`, the largest source-free radius, does not reach past the
/// annulus outer edge a warning is logged and `overlaps_sources` is set;
/// the bounds are returned unchanged either way.
pub fn optimize_annulus(optrad: f64, outann: f64) -> Annulus {
    let outer = round4(2.0 * optrad);
    let overlaps_sources = outann <= outer;
    if overlaps_sources {
        warn!("There are known sources within the background annulus.");
        warn!("Mask these out with a high-resolution background. (Will increase run times.)");
    }
    Annulus {
        inner: round4(1.2 * optrad),
        outer,
        overlaps_sources,
    }
}

/// Suggests aperture position, radius and background annulus for a target.
///
/// The aperture is centred on the nearest source with a radius of twice
/// its FWHM. If no distinct neighbour lies within
/// `config.distinct_radius`, the background is unconstrained.
pub fn suggest_parameters(
    adapter: &dyn QueryAdapter,
    band: Band,
    position: SkyPosition,
    config: &SelectionConfig,
    opts: &QueryOptions,
) -> Result<ApertureSuggestion, SelectionError> {
    let nearest = nearest_source(adapter, band, position, config, opts)?;
    let radius = round4(2.0 * nearest.width());
    let outann = match suggest_bg_radius(adapter, band, position, config, opts) {
        Ok(outann) => outann,
        Err(SelectionError::NoDistinctSource { .. }) => f64::INFINITY,
        Err(e) => return Err(e),
    };
    let annulus = optimize_annulus(radius, outann);

    let suggestion = ApertureSuggestion {
        position: nearest.position(),
        radius,
        annulus,
    };
    info!(
        "Suggested sky position [RA,Dec]: [{}, {}]",
        suggestion.position.ra, suggestion.position.dec
    );
    info!("Suggested aperture radius (deg): {}", radius);
    info!(
        "Suggested background annulus:    [{}, {}]",
        annulus.inner, annulus.outer
    );
    Ok(suggestion)
}
