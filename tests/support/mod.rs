#![allow(dead_code)]

use galexdb::query::{McatSource, VisitSource, APERTURE_COUNT};

/// Coadd source with identical raw aperture magnitudes across settings.
pub fn mcat_source(ra: f64, dec: f64, nuv_mag: f64, fuv_mag: f64, fwhm: f64) -> McatSource {
    McatSource {
        ra,
        dec,
        nuv_mag,
        fuv_mag,
        nuv_skybg: 0.003,
        fuv_skybg: 0.0003,
        fuv_aper: [-2.0; APERTURE_COUNT],
        nuv_aper: [-3.0; APERTURE_COUNT],
        nuv_fwhm: fwhm,
        fuv_fwhm: fwhm,
    }
}

pub fn visit_source(ra: f64, dec: f64, nuv_mag: f64, fuv_mag: f64, expt: f64) -> VisitSource {
    VisitSource {
        ra,
        dec,
        nuv_mag,
        fuv_mag,
        nuv_expt: expt,
        fuv_expt: expt / 2.0,
        fuv_aper: [-2.0; APERTURE_COUNT],
        nuv_aper: [-3.0; APERTURE_COUNT],
    }
}

/// Two eclipses worth of one-second timestamps, in seconds.
pub fn two_eclipse_timestamps() -> Vec<f64> {
    let first = (0..=1500).map(|i| 7.0e8 + i as f64);
    let second = (0..=1200).map(|i| 7.0e8 + 6000.0 + i as f64);
    first.chain(second).collect()
}
