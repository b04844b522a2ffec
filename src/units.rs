//! Unit helpers for the time axis and for flat-sky angular geometry.
//!
//! Time windows are carried as `qtty` quantities so that scaled mission
//! timestamps cannot be mixed up with raw ones. Catalog positions stay in
//! plain decimal degrees because they arrive as numeric table columns; the
//! helpers below are the only places where angular units are converted.

use qtty::{Arcsecond, Degree, Quantity, Unit};

/// Marker trait for units that share the same physical dimension.
///
/// This trait is automatically implemented for any pair of units where
/// `From::Dim == To::Dim`, enabling compile-time checked conversions.
///
/// # Example
///
/// ```ignore
/// use qtty::{Degree, Arcsecond};
/// use galexdb::units::SameDim;
///
/// fn accepts_same_dim<From, To>()
/// where
///     From: SameDim<To>,
/// {}
///
/// accepts_same_dim::<Degree, Arcsecond>(); // OK
/// // accepts_same_dim::<Second, Degree>(); // Error: different dimensions
/// ```
pub trait SameDim<To: Unit>: Unit<Dim = To::Dim> {}

impl<From, To> SameDim<To> for From
where
    From: Unit,
    To: Unit<Dim = From::Dim>,
{
}

/// Converts a quantity from one unit to another unit of the same dimension.
#[inline]
pub const fn convert<From, To>(q: Quantity<From>) -> Quantity<To>
where
    From: SameDim<To>,
    To: Unit,
{
    q.to_const::<To>()
}

/// Flat-sky separation in degrees between two positions.
///
/// This is the Euclidean distance in (RA, Dec) space, not the great-circle
/// distance. Source matching is done over sub-arcminute radii, where the
/// difference is well below catalog astrometric error away from the poles.
#[inline]
pub fn flat_distance(ra0: f64, dec0: f64, ra1: f64, dec1: f64) -> f64 {
    ((ra1 - ra0).powi(2) + (dec1 - dec0).powi(2)).sqrt()
}

/// Area in square arcseconds of a circular aperture of the given radius.
pub fn aperture_area(radius: Quantity<Degree>) -> f64 {
    let r: Quantity<Arcsecond> = convert(radius);
    std::f64::consts::PI * r.value() * r.value()
}
