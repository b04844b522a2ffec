//! Effective exposure time over a time range, optionally at a sky position.

use log::warn;
use qtty::{Second, Seconds};

use super::chunk::{chunk_boundaries, window_exposure};
use crate::config::ExposureConfig;
use crate::query::{Band, QueryAdapter, QueryOptions, SkyPosition};
use crate::windows::{time_ranges, Interval, IntervalSet};

/// Breakdown of an effective-exposure computation.
///
/// `total` is what [`compute_exptime`] returns. Windows whose dead-time
/// queries failed contribute nothing to it and are counted in
/// `windows_failed`; a failed window lookup sets `window_query_failed` and
/// leaves `windows` empty.
///
/// `chunks_planned` counts the chunks the windows were split into. A window
/// stops querying at its first failing chunk and zero-length chunks are
/// never queried, so the adapter may see fewer calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureReport {
    pub total: Seconds,
    pub windows: IntervalSet<Second>,
    pub chunks_planned: usize,
    pub windows_failed: usize,
    pub window_query_failed: bool,
}

impl ExposureReport {
    /// True when every query behind `total` succeeded.
    pub fn is_complete(&self) -> bool {
        self.windows_failed == 0 && !self.window_query_failed
    }
}

/// Effective exposure time in `trange`, in seconds.
///
/// With a sky position, `trange` is first reduced to the windows during
/// which that position was on the detector. Query failures degrade to a
/// zero contribution; use [`compute_exptime_report`] to detect them.
pub fn compute_exptime(
    adapter: &dyn QueryAdapter,
    band: Band,
    trange: Interval<Second>,
    position: Option<SkyPosition>,
    config: &ExposureConfig,
    opts: &QueryOptions,
) -> Seconds {
    compute_exptime_report(adapter, band, trange, position, config, opts).total
}

/// Same as [`compute_exptime`], keeping the per-window accounting.
pub fn compute_exptime_report(
    adapter: &dyn QueryAdapter,
    band: Band,
    trange: Interval<Second>,
    position: Option<SkyPosition>,
    config: &ExposureConfig,
    opts: &QueryOptions,
) -> ExposureReport {
    if let Err(e) = config.validate() {
        warn!("{}; chunks fall back to whole windows", e);
    }
    let (windows, window_query_failed) = match position {
        Some(position) => {
            let outcome = time_ranges(adapter, band, position, Some(trange), &config.windows, opts);
            let failed = outcome.is_failure();
            (outcome.into_windows(), failed)
        }
        None => (IntervalSet::from(trange), false),
    };

    let mut total = Seconds::new(0.0);
    let mut chunks_planned = 0;
    let mut windows_failed = 0;
    for window in &windows {
        chunks_planned += chunk_boundaries(*window, config.chunk_size).len() - 1;
        match window_exposure(adapter, band, *window, config.chunk_size, opts) {
            Ok(exptime) => total += exptime,
            Err(e) => {
                warn!("{} dead-time query failed over {}: {}", band, window, e);
                windows_failed += 1;
            }
        }
    }

    ExposureReport {
        total,
        windows,
        chunks_planned,
        windows_failed,
        window_query_failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{MemoryAdapter, QueryKind};
    use approx::assert_relative_eq;

    fn iv(start: f64, end: f64) -> Interval<Second> {
        Interval::from_f64(start, end)
    }

    #[test]
    fn whole_range_without_position() {
        let adapter = MemoryAdapter::new().with_dead_time(0.01, 0.0);
        let e = compute_exptime(
            &adapter,
            Band::Nuv,
            iv(0.0, 1000.0),
            None,
            &ExposureConfig::default(),
            &QueryOptions::default(),
        );
        assert_relative_eq!(e.value(), 990.0, epsilon = 1e-9);
        assert!(adapter.calls_of(QueryKind::ExposureRanges).is_empty());
    }

    #[test]
    fn position_restricts_to_windows() {
        let adapter = MemoryAdapter::new()
            .with_timestamps_seconds(&[10.0, 11.0, 12.0, 100.0, 101.0, 102.0, 103.0])
            .with_dead_time(0.0, 0.0);
        let report = compute_exptime_report(
            &adapter,
            Band::Nuv,
            iv(0.0, 1000.0),
            Some(SkyPosition::new(1.0, 1.0)),
            &ExposureConfig::default(),
            &QueryOptions::default(),
        );
        assert_eq!(report.windows.len(), 2);
        assert_relative_eq!(report.total.value(), 5.0, epsilon = 1e-9);
        assert_eq!(report.chunks_planned, 2);
        assert!(report.is_complete());
    }

    #[test]
    fn failed_window_contributes_zero() {
        let adapter = MemoryAdapter::new()
            .with_timestamps_seconds(&[10.0, 11.0, 12.0, 100.0, 101.0, 102.0, 103.0])
            .failing_shutdead_call(0);
        let report = compute_exptime_report(
            &adapter,
            Band::Fuv,
            iv(0.0, 1000.0),
            Some(SkyPosition::new(1.0, 1.0)),
            &ExposureConfig::default(),
            &QueryOptions::default(),
        );
        assert_relative_eq!(report.total.value(), 3.0, epsilon = 1e-9);
        assert_eq!(report.windows_failed, 1);
        assert_eq!(report.chunks_planned, 2);
        assert_eq!(adapter.calls_of(QueryKind::Shutdead).len(), 2);
        assert!(!report.is_complete());
    }

    #[test]
    fn window_query_failure_yields_zero() {
        let adapter = MemoryAdapter::new().failing(QueryKind::ExposureRanges);
        let report = compute_exptime_report(
            &adapter,
            Band::Nuv,
            iv(0.0, 1000.0),
            Some(SkyPosition::new(1.0, 1.0)),
            &ExposureConfig::default(),
            &QueryOptions::default(),
        );
        assert_eq!(report.total.value(), 0.0);
        assert!(report.window_query_failed);
        assert!(adapter.calls_of(QueryKind::Shutdead).is_empty());
    }

    #[test]
    fn invalid_chunk_size_integrates_whole_windows() {
        let adapter = MemoryAdapter::new().with_dead_time(0.01, 0.0);
        for chunk_size in [f64::NAN, 0.0, -5.0] {
            let config = ExposureConfig {
                chunk_size,
                ..ExposureConfig::default()
            };
            let report = compute_exptime_report(
                &adapter,
                Band::Nuv,
                iv(0.0, 1000.0),
                None,
                &config,
                &QueryOptions::default(),
            );
            assert_eq!(report.chunks_planned, 1);
            assert_relative_eq!(report.total.value(), 990.0, epsilon = 1e-9);
        }
        assert_eq!(adapter.calls_of(QueryKind::Shutdead).len(), 3);
    }

    #[test]
    fn long_range_is_chunked() {
        let adapter = MemoryAdapter::new();
        let config = ExposureConfig {
            chunk_size: 100.0,
            ..ExposureConfig::default()
        };
        let report = compute_exptime_report(
            &adapter,
            Band::Nuv,
            iv(0.0, 1050.0),
            None,
            &config,
            &QueryOptions::default(),
        );
        // ceil(1050 / 100) = 11 boundaries, 10 queries.
        assert_eq!(report.chunks_planned, 10);
        assert_eq!(adapter.calls_of(QueryKind::Shutdead).len(), 10);
        assert_relative_eq!(report.total.value(), 1050.0, epsilon = 1e-6);
    }
}
