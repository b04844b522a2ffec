//! Sky background estimate from nearby MCAT sources.

use log::debug;
use qtty::Degrees;

use super::CatalogError;
use crate::query::{Band, QueryAdapter, QueryOptions, SkyPosition};
use crate::units::aperture_area;

/// Faint enough to admit every catalogued source.
const SKYBG_MAGLIMIT: f64 = 30.0;

/// Expected background in photons/s inside a circular aperture of
/// `radius` degrees, from the mean MCAT `skybg` (photons/s/arcsec²) of all
/// sources in that aperture.
pub fn mcat_skybg(
    adapter: &dyn QueryAdapter,
    band: Band,
    position: SkyPosition,
    radius: f64,
    opts: &QueryOptions,
) -> Result<f64, CatalogError> {
    let sources = adapter.mcat_sources(band, position, radius, SKYBG_MAGLIMIT, opts)?;
    if sources.is_empty() {
        return Err(CatalogError::NoSources { band });
    }
    let mean = sources.iter().map(|s| s.skybg(band)).sum::<f64>() / sources.len() as f64;
    debug!(
        "{} skybg {:.6} photons/s/arcsec² from {} sources",
        band,
        mean,
        sources.len()
    );
    Ok(mean * aperture_area(Degrees::new(radius)))
}
