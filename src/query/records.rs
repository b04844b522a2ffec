//! Named-field row records returned by the query adapter.
//!
//! Each record mirrors one row schema of the adapter contract. Rows are
//! addressed by field name so a change of column order in the upstream
//! response is absorbed by the adapter, not by the algorithms.

use super::Band;

/// Sky position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkyPosition {
    pub ra: f64,
    pub dec: f64,
}

impl SkyPosition {
    pub const fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Flat-sky separation in degrees.
    pub fn distance_to(&self, other: &SkyPosition) -> f64 {
        crate::units::flat_distance(self.ra, self.dec, other.ra, other.dec)
    }
}

/// One aspect-solution sample (spacecraft pointing at time `t`).
#[derive(Debug, Clone, PartialEq)]
pub struct AspectRecord {
    pub eclipse: i16,
    pub filename: String,
    pub t: f64,
    pub ra: f64,
    pub dec: f64,
    pub twist: f64,
    pub flag: i8,
    pub ra0: f64,
    pub dec0: f64,
    pub twist0: f64,
}

/// Dead time and shutter-closed fraction for one time chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadTime {
    /// Total dead time in seconds.
    pub dead_time: f64,
    /// Fraction of the chunk during which the shutter was closed.
    pub shutter_closed_fraction: f64,
}

/// Number of aperture settings reported per band.
pub const APERTURE_COUNT: usize = 7;

/// One coadd MCAT source row.
///
/// Aperture magnitudes are raw (zero-point not yet applied); index `0`
/// holds aperture setting 1.
#[derive(Debug, Clone, PartialEq)]
pub struct McatSource {
    pub ra: f64,
    pub dec: f64,
    pub nuv_mag: f64,
    pub fuv_mag: f64,
    /// Sky background, photons/s/arcsec².
    pub nuv_skybg: f64,
    pub fuv_skybg: f64,
    pub fuv_aper: [f64; APERTURE_COUNT],
    pub nuv_aper: [f64; APERTURE_COUNT],
    pub nuv_fwhm: f64,
    pub fuv_fwhm: f64,
}

impl McatSource {
    pub fn position(&self) -> SkyPosition {
        SkyPosition::new(self.ra, self.dec)
    }

    pub fn mag(&self, band: Band) -> f64 {
        match band {
            Band::Nuv => self.nuv_mag,
            Band::Fuv => self.fuv_mag,
        }
    }

    pub fn fwhm(&self, band: Band) -> f64 {
        match band {
            Band::Nuv => self.nuv_fwhm,
            Band::Fuv => self.fuv_fwhm,
        }
    }

    pub fn skybg(&self, band: Band) -> f64 {
        match band {
            Band::Nuv => self.nuv_skybg,
            Band::Fuv => self.fuv_skybg,
        }
    }

    pub fn apertures(&self, band: Band) -> &[f64; APERTURE_COUNT] {
        match band {
            Band::Nuv => &self.nuv_aper,
            Band::Fuv => &self.fuv_aper,
        }
    }
}

/// One visit-level MCAT source row.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitSource {
    pub ra: f64,
    pub dec: f64,
    pub nuv_mag: f64,
    pub fuv_mag: f64,
    /// Exposure time of the visit, seconds.
    pub nuv_expt: f64,
    pub fuv_expt: f64,
    pub fuv_aper: [f64; APERTURE_COUNT],
    pub nuv_aper: [f64; APERTURE_COUNT],
}

impl VisitSource {
    pub fn mag(&self, band: Band) -> f64 {
        match band {
            Band::Nuv => self.nuv_mag,
            Band::Fuv => self.fuv_mag,
        }
    }

    pub fn expt(&self, band: Band) -> f64 {
        match band {
            Band::Nuv => self.nuv_expt,
            Band::Fuv => self.fuv_expt,
        }
    }

    pub fn apertures(&self, band: Band) -> &[f64; APERTURE_COUNT] {
        match band {
            Band::Nuv => &self.nuv_aper,
            Band::Fuv => &self.fuv_aper,
        }
    }
}
