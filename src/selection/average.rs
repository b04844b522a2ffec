//! Averaging of near-duplicate catalog entries.

use log::debug;

use super::{round4, SelectionError};
use crate::query::{Band, QueryAdapter, QueryOptions, SkyPosition};

/// Mean position and FWHM of the sources around a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragedSource {
    pub position: SkyPosition,
    /// Mean FWHM in degrees, rounded to 4 decimals.
    pub fwhm: f64,
}

/// Averages every source within `radius` that has a positive FWHM in `band`.
///
/// Fails with [`SelectionError::NoQualifyingSources`] when none qualifies.
pub fn avg_sources(
    adapter: &dyn QueryAdapter,
    band: Band,
    position: SkyPosition,
    radius: f64,
    maglimit: f64,
    opts: &QueryOptions,
) -> Result<AveragedSource, SelectionError> {
    let sources = adapter.mcat_sources(band, position, radius, maglimit, opts)?;
    let qualifying: Vec<_> = sources.iter().filter(|s| s.fwhm(band) > 0.0).collect();
    debug!(
        "averaging {} of {} {} sources",
        qualifying.len(),
        sources.len(),
        band
    );
    if qualifying.is_empty() {
        return Err(SelectionError::NoQualifyingSources { band });
    }

    let n = qualifying.len() as f64;
    let (ra, dec, fwhm) = qualifying.iter().fold((0.0, 0.0, 0.0), |(ra, dec, fwhm), s| {
        (ra + s.ra, dec + s.dec, fwhm + s.fwhm(band))
    });
    Ok(AveragedSource {
        position: SkyPosition::new(ra / n, dec / n),
        fwhm: round4(fwhm / n),
    })
}
