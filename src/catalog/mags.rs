//! Per-source magnitudes from the coadd or visit MCAT.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use super::CatalogError;
use crate::config::ZeroPoints;
use crate::query::{Band, QueryAdapter, QueryOptions, SkyPosition, APERTURE_COUNT};

/// Which MCAT to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CatalogMode {
    /// Catalog of merged multi-exposure images. Magnitude cut applied by
    /// the query.
    Coadd,
    /// Catalog of single visits. Larger and slower; the magnitude cut is
    /// applied here after the query.
    Visit,
}

impl fmt::Display for CatalogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogMode::Coadd => f.write_str("coadd"),
            CatalogMode::Visit => f.write_str("visit"),
        }
    }
}

impl FromStr for CatalogMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coadd" => Ok(CatalogMode::Coadd),
            "visit" => Ok(CatalogMode::Visit),
            other => Err(CatalogError::UnknownMode(other.to_string())),
        }
    }
}

/// Magnitude columns for one band.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BandMagnitudes {
    /// Reported magnitude, as catalogued.
    pub mag: Vec<f64>,
    /// Aperture magnitudes with the band zero-point applied; index `0` is
    /// aperture setting 1.
    pub apertures: [Vec<f64>; APERTURE_COUNT],
    /// Visit exposure time per source. Only present in visit mode.
    pub expt: Option<Vec<f64>>,
}

impl BandMagnitudes {
    /// Aperture column by its 1-based setting number.
    pub fn aperture(&self, setting: usize) -> Option<&[f64]> {
        setting
            .checked_sub(1)
            .and_then(|i| self.apertures.get(i))
            .map(Vec::as_slice)
    }

    fn push(&mut self, mag: f64, apertures: &[f64; APERTURE_COUNT], zero_point: f64) {
        self.mag.push(mag);
        for (column, raw) in self.apertures.iter_mut().zip(apertures) {
            column.push(raw + zero_point);
        }
    }
}

/// Column-oriented magnitude table, one row per source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MagnitudeTable {
    pub ra: Vec<f64>,
    pub dec: Vec<f64>,
    pub nuv: BandMagnitudes,
    pub fuv: BandMagnitudes,
}

impl MagnitudeTable {
    pub fn len(&self) -> usize {
        self.ra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra.is_empty()
    }

    pub fn band(&self, band: Band) -> &BandMagnitudes {
        match band {
            Band::Nuv => &self.nuv,
            Band::Fuv => &self.fuv,
        }
    }

    pub fn positions(&self) -> Vec<SkyPosition> {
        self.ra
            .iter()
            .zip(&self.dec)
            .map(|(ra, dec)| SkyPosition::new(*ra, *dec))
            .collect()
    }
}

/// Result of a magnitude lookup. An empty catalog response is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum MagnitudeResult {
    Sources(MagnitudeTable),
    NoSources,
}

impl MagnitudeResult {
    pub fn into_table(self) -> Option<MagnitudeTable> {
        match self {
            MagnitudeResult::Sources(table) => Some(table),
            MagnitudeResult::NoSources => None,
        }
    }
}

/// Searches the MCAT around `position` and returns magnitudes for every
/// aperture setting in both bands.
///
/// Visit mode returns many more sources, more slowly, than coadd mode for
/// the same radius. To find unique sources over a large region, use coadd
/// mode and pass the positions through
/// [`unique_sources`](crate::selection::unique_sources).
#[allow(clippy::too_many_arguments)]
pub fn get_mags(
    adapter: &dyn QueryAdapter,
    band: Band,
    position: SkyPosition,
    radius: f64,
    maglimit: f64,
    mode: CatalogMode,
    zero_points: &ZeroPoints,
    opts: &QueryOptions,
) -> Result<MagnitudeResult, CatalogError> {
    let mut table = MagnitudeTable::default();
    match mode {
        CatalogMode::Coadd => {
            let rows = adapter.mcat_sources(band, position, radius, maglimit, opts)?;
            for row in &rows {
                table.ra.push(row.ra);
                table.dec.push(row.dec);
                for b in [Band::Nuv, Band::Fuv] {
                    table_band_mut(&mut table, b).push(
                        row.mag(b),
                        row.apertures(b),
                        zero_points.for_band(b),
                    );
                }
            }
        }
        CatalogMode::Visit => {
            let rows = adapter.mcat_visit_sources(position, radius, opts)?;
            debug!("{} visit sources before magnitude cut", rows.len());
            for b in [Band::Nuv, Band::Fuv] {
                table_band_mut(&mut table, b).expt = Some(Vec::new());
            }
            for row in rows
                .iter()
                .filter(|r| r.mag(band) > 0.0 && r.mag(band) < maglimit)
            {
                table.ra.push(row.ra);
                table.dec.push(row.dec);
                for b in [Band::Nuv, Band::Fuv] {
                    let column = table_band_mut(&mut table, b);
                    column.push(row.mag(b), row.apertures(b), zero_points.for_band(b));
                    if let Some(expt) = column.expt.as_mut() {
                        expt.push(row.expt(b));
                    }
                }
            }
        }
    }

    if table.is_empty() {
        warn!("No sources found!");
        return Ok(MagnitudeResult::NoSources);
    }
    Ok(MagnitudeResult::Sources(table))
}

fn table_band_mut(table: &mut MagnitudeTable, band: Band) -> &mut BandMagnitudes {
    match band {
        Band::Nuv => &mut table.nuv,
        Band::Fuv => &mut table.fuv,
    }
}
