//! Query adapter contract.
//!
//! The data-access layer that executes time-range, aspect and catalog
//! queries lives outside this crate. Everything here talks to it through
//! [`QueryAdapter`], which returns named-field rows and a single
//! [`QueryError`] failure signal. Retries are the adapter's business: the
//! retry count in [`QueryOptions`] is handed through untouched.
//!
//! [`MemoryAdapter`] is an in-memory implementation backed by fixed tables,
//! used for tests, demos and offline analysis of pre-fetched data.

mod band;
mod error;
mod memory;
mod records;

pub use band::{Band, UnknownBand};
pub use error::{QueryError, QueryResult};
pub use memory::{MemoryAdapter, QueryCall, QueryKind};
pub use records::{AspectRecord, DeadTime, McatSource, SkyPosition, VisitSource, APERTURE_COUNT};

/// Per-call knobs passed through to the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QueryOptions {
    /// Adapter-side verbosity level.
    pub verbose: u8,
    /// Number of attempts the adapter may make before reporting failure.
    pub retries: u32,
}

impl QueryOptions {
    pub const fn new(verbose: u8, retries: u32) -> Self {
        Self { verbose, retries }
    }

    pub const fn with_retries(self, retries: u32) -> Self {
        Self { retries, ..self }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::new(0, 20)
    }
}

/// Parameters of an exposure-timestamp query at a sky position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureRangeRequest {
    pub band: Band,
    pub position: SkyPosition,
    /// Start of the time range, seconds.
    pub t0: f64,
    /// End of the time range, seconds.
    pub t1: f64,
    /// Detector diameter in degrees; shrink to exclude the detector edges.
    pub detsize: f64,
    /// Scale between stored timestamps and seconds.
    pub tscale: f64,
}

/// Access to the photon/aspect database and the MCAT catalogs.
///
/// Implementations block until the response is available and perform their
/// own retries (up to `opts.retries`) before returning an error.
pub trait QueryAdapter: Send + Sync {
    /// Aspect solutions in `[t0, t1]` seconds. `t` is returned unscaled.
    fn aspect(&self, t0: f64, t1: f64, opts: &QueryOptions) -> QueryResult<Vec<AspectRecord>>;

    /// Raw exposure timestamps (unscaled, in units of `1 / tscale` seconds)
    /// recorded while `position` was on the detector.
    fn exposure_ranges(
        &self,
        request: &ExposureRangeRequest,
        opts: &QueryOptions,
    ) -> QueryResult<Vec<f64>>;

    /// Dead time and shutter-closed fraction over `[t0, t1]` seconds.
    fn shutdead(&self, band: Band, t0: f64, t1: f64, opts: &QueryOptions)
        -> QueryResult<DeadTime>;

    /// Coadd MCAT sources within `radius` degrees, brighter than `maglimit`
    /// in `band`.
    fn mcat_sources(
        &self,
        band: Band,
        position: SkyPosition,
        radius: f64,
        maglimit: f64,
        opts: &QueryOptions,
    ) -> QueryResult<Vec<McatSource>>;

    /// Visit-level MCAT sources within `radius` degrees; no magnitude cut.
    fn mcat_visit_sources(
        &self,
        position: SkyPosition,
        radius: f64,
        opts: &QueryOptions,
    ) -> QueryResult<Vec<VisitSource>>;
}
