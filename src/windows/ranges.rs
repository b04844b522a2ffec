//! Exposure windows at a sky position, resolved through the query adapter.

use log::{debug, warn};
use qtty::Second;

use super::{reconstruct, Interval, IntervalSet};
use crate::catalog::get_aspect;
use crate::config::WindowPolicy;
use crate::query::{Band, ExposureRangeRequest, QueryAdapter, QueryError, QueryOptions, SkyPosition};

/// Time range searched when the caller gives none: the whole mission.
pub const MISSION_RANGE: (f64, f64) = (1.0, 1.0e12);

/// Outcome of a window lookup.
///
/// Distinguishes a confirmed absence of exposure from a broken query, so
/// callers can choose between fail-soft and fail-loud handling.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowOutcome {
    /// At least one valid window was found.
    Found(IntervalSet<Second>),
    /// The query succeeded but yielded no window.
    NoExposure,
    /// The query layer failed after its retries.
    QueryFailed(QueryError),
}

impl WindowOutcome {
    /// Fail-soft view: the windows, or an empty set for any other outcome.
    pub fn into_windows(self) -> IntervalSet<Second> {
        match self {
            WindowOutcome::Found(windows) => windows,
            WindowOutcome::NoExposure | WindowOutcome::QueryFailed(_) => IntervalSet::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, WindowOutcome::QueryFailed(_))
    }
}

/// Finds the contiguous exposure windows covering `position` in `band`.
///
/// With `policy.predicted` the windows are estimated from aspect solutions
/// instead of recorded exposure. Stored timestamps are divided by
/// `policy.tscale` before reconstruction.
pub fn time_ranges(
    adapter: &dyn QueryAdapter,
    band: Band,
    position: SkyPosition,
    trange: Option<Interval<Second>>,
    policy: &WindowPolicy,
    opts: &QueryOptions,
) -> WindowOutcome {
    let (t0, t1) = trange
        .map(|t| (t.start().value(), t.end().value()))
        .unwrap_or(MISSION_RANGE);

    let times = if policy.predicted {
        get_aspect(adapter, t0, t1, policy.tscale, opts)
            .map(|rows| rows.into_iter().map(|a| a.t).collect::<Vec<_>>())
    } else {
        let request = ExposureRangeRequest {
            band,
            position,
            t0,
            t1,
            detsize: policy.detsize,
            tscale: policy.tscale,
        };
        adapter
            .exposure_ranges(&request, opts)
            .map(|raw| raw.into_iter().map(|t| t / policy.tscale).collect())
    };

    let times = match times {
        Ok(times) => times,
        Err(e) => {
            warn!("{} window query failed for [{}, {}]: {}", band, t0, t1, e);
            return WindowOutcome::QueryFailed(e);
        }
    };
    debug!(
        "Parsing {} exposure timestamps in [{}, {}]",
        times.len(),
        t0,
        t1
    );

    let windows = reconstruct(&times, policy.maxgap, policy.minexp);
    debug!("Reconstructed {} exposure windows", windows.len());
    if windows.is_empty() {
        WindowOutcome::NoExposure
    } else {
        WindowOutcome::Found(windows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{AspectRecord, MemoryAdapter, QueryCall, QueryKind};

    fn pos() -> SkyPosition {
        SkyPosition::new(176.919, 0.255)
    }

    #[test]
    fn finds_windows_from_scaled_timestamps() {
        let adapter = MemoryAdapter::new()
            .with_timestamps_seconds(&[100.0, 100.5, 101.0, 200.0, 201.0, 202.0]);
        let outcome = time_ranges(
            &adapter,
            Band::Nuv,
            pos(),
            None,
            &WindowPolicy::default(),
            &QueryOptions::default(),
        );
        assert_eq!(
            outcome,
            WindowOutcome::Found(IntervalSet::from_sorted_unchecked(vec![
                Interval::from_f64(100.0, 101.0),
                Interval::from_f64(200.0, 202.0),
            ]))
        );
    }

    #[test]
    fn raw_timestamps_follow_policy_tscale() {
        // Timestamps stored in tenths of a second.
        let adapter = MemoryAdapter::new()
            .with_tscale(10.0)
            .with_timestamps(vec![500.0, 510.0, 520.0, 900.0, 910.0]);
        let policy = WindowPolicy {
            tscale: 10.0,
            ..WindowPolicy::default()
        };
        let outcome = time_ranges(
            &adapter,
            Band::Nuv,
            pos(),
            Some(Interval::from_f64(0.0, 100.0)),
            &policy,
            &QueryOptions::default(),
        );
        assert_eq!(
            outcome.into_windows(),
            vec![Interval::from_f64(50.0, 52.0), Interval::from_f64(90.0, 91.0)]
        );
    }

    #[test]
    fn default_range_covers_mission() {
        let adapter = MemoryAdapter::new();
        time_ranges(
            &adapter,
            Band::Fuv,
            pos(),
            None,
            &WindowPolicy::default(),
            &QueryOptions::default(),
        );
        assert_eq!(
            adapter.calls(),
            vec![QueryCall::ExposureRanges {
                band: Band::Fuv,
                t0: 1.0,
                t1: 1.0e12
            }]
        );
    }

    #[test]
    fn empty_response_is_no_exposure() {
        let adapter = MemoryAdapter::new();
        let outcome = time_ranges(
            &adapter,
            Band::Nuv,
            pos(),
            Some(Interval::from_f64(0.0, 10.0)),
            &WindowPolicy::default(),
            &QueryOptions::default(),
        );
        assert_eq!(outcome, WindowOutcome::NoExposure);
        assert!(outcome.into_windows().is_empty());
    }

    #[test]
    fn query_failure_is_reported_not_raised() {
        let adapter = MemoryAdapter::new().failing(QueryKind::ExposureRanges);
        let outcome = time_ranges(
            &adapter,
            Band::Nuv,
            pos(),
            None,
            &WindowPolicy::default(),
            &QueryOptions::default().with_retries(100),
        );
        assert!(outcome.is_failure());
        assert_eq!(
            outcome,
            WindowOutcome::QueryFailed(QueryError::RetriesExhausted { attempts: 100 })
        );
        assert!(outcome.into_windows().is_empty());
    }

    #[test]
    fn predicted_windows_use_aspect_times() {
        let aspect = [10.0, 11.0, 12.0, 30.0, 31.0]
            .iter()
            .map(|t| AspectRecord {
                eclipse: 1,
                filename: "e00001".to_string(),
                t: t * 1000.0,
                ra: 0.0,
                dec: 0.0,
                twist: 0.0,
                flag: 0,
                ra0: 0.0,
                dec0: 0.0,
                twist0: 0.0,
            })
            .collect();
        let adapter = MemoryAdapter::new().with_aspect(aspect);
        let policy = WindowPolicy {
            predicted: true,
            ..WindowPolicy::default()
        };
        let windows = time_ranges(
            &adapter,
            Band::Nuv,
            pos(),
            None,
            &policy,
            &QueryOptions::default(),
        )
        .into_windows();
        assert_eq!(
            windows,
            vec![Interval::from_f64(10.0, 12.0), Interval::from_f64(30.0, 31.0)]
        );
        assert!(adapter.calls_of(QueryKind::ExposureRanges).is_empty());
    }
}
