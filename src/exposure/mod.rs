//! Effective exposure time.
//!
//! [`chunk`] integrates dead-time and shutter corrections over one window in
//! bounded chunks; [`orchestrator`] resolves a time range, optionally at a
//! sky position, into windows and sums them.

pub mod chunk;
pub mod orchestrator;

pub use chunk::{chunk_boundaries, exposure, window_exposure};
pub use orchestrator::{compute_exptime, compute_exptime_report, ExposureReport};
