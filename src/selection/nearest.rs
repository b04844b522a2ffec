//! Nearest-source searches.

use log::{debug, info};

use super::average::{avg_sources, AveragedSource};
use super::SelectionError;
use crate::config::SelectionConfig;
use crate::query::{Band, McatSource, QueryAdapter, QueryOptions, SkyPosition};

/// Outcome of [`nearest_source`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NearestSource {
    /// The nearest catalog source, averaged with its near duplicates.
    Found { source: AveragedSource, band: Band },
    /// Nothing in either band: the input position with a default radius.
    Fallback { position: SkyPosition, radius: f64 },
}

impl NearestSource {
    pub fn position(&self) -> SkyPosition {
        match self {
            NearestSource::Found { source, .. } => source.position,
            NearestSource::Fallback { position, .. } => *position,
        }
    }

    /// Source FWHM, or the fallback radius when no source was found.
    pub fn width(&self) -> f64 {
        match self {
            NearestSource::Found { source, .. } => source.fwhm,
            NearestSource::Fallback { radius, .. } => *radius,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, NearestSource::Fallback { .. })
    }
}

/// First source at the minimum flat-sky distance from `position`.
fn closest<'a, I>(position: SkyPosition, candidates: I) -> Option<&'a McatSource>
where
    I: IntoIterator<Item = &'a McatSource>,
{
    candidates
        .into_iter()
        .fold(None, |best: Option<(&'a McatSource, f64)>, s| {
            let d = position.distance_to(&s.position());
            match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((s, d)),
            }
        })
        .map(|(s, _)| s)
}

/// Targeting parameters for the MCAT source nearest to `position`.
///
/// An FUV search that finds nothing is retried in NUV. When neither band
/// has a source within `config.nearest_radius`, the input position is
/// returned with `config.fallback_radius`. The selected source is re-queried
/// through [`avg_sources`] so duplicate entries at its position are merged.
pub fn nearest_source(
    adapter: &dyn QueryAdapter,
    band: Band,
    position: SkyPosition,
    config: &SelectionConfig,
    opts: &QueryOptions,
) -> Result<NearestSource, SelectionError> {
    let mut band = band;
    let mut sources =
        adapter.mcat_sources(band, position, config.nearest_radius, config.maglimit, opts)?;
    if sources.is_empty() && band == Band::Fuv {
        info!("No nearby MCAT source found in FUV. Trying NUV...");
        band = Band::Nuv;
        sources =
            adapter.mcat_sources(band, position, config.nearest_radius, config.maglimit, opts)?;
    }

    let Some(nearest) = closest(position, &sources) else {
        info!("No nearby MCAT source found. Using input sky position.");
        return Ok(NearestSource::Fallback {
            position,
            radius: config.fallback_radius,
        });
    };
    debug!("Finding nearest among {} nearby sources", sources.len());

    let source = avg_sources(
        adapter,
        band,
        nearest.position(),
        config.avg_radius,
        config.maglimit,
        opts,
    )?;
    Ok(NearestSource::Found { source, band })
}

/// The nearest source that is not the target itself.
///
/// Candidates within `config.distinct_margin` of `position` are treated as
/// the target and skipped. The raw catalog row is returned.
pub fn nearest_distinct_source(
    adapter: &dyn QueryAdapter,
    band: Band,
    position: SkyPosition,
    config: &SelectionConfig,
    opts: &QueryOptions,
) -> Result<McatSource, SelectionError> {
    let sources =
        adapter.mcat_sources(band, position, config.distinct_radius, config.maglimit, opts)?;
    let distinct = sources
        .iter()
        .filter(|s| position.distance_to(&s.position()) > config.distinct_margin);
    closest(position, distinct)
        .cloned()
        .ok_or(SelectionError::NoDistinctSource { band })
}
