//! In-memory query adapter backed by fixed tables.

use std::collections::HashSet;
use std::sync::Mutex;

use log::debug;

use super::{
    AspectRecord, Band, DeadTime, ExposureRangeRequest, McatSource, QueryAdapter, QueryError,
    QueryOptions, QueryResult, SkyPosition, VisitSource,
};

/// Kind of adapter operation, used for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Aspect,
    ExposureRanges,
    Shutdead,
    McatSources,
    McatVisitSources,
}

/// Record of one adapter call, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryCall {
    Aspect { t0: f64, t1: f64 },
    ExposureRanges { band: Band, t0: f64, t1: f64 },
    Shutdead { band: Band, t0: f64, t1: f64 },
    McatSources { band: Band, position: SkyPosition, radius: f64, maglimit: f64 },
    McatVisitSources { position: SkyPosition, radius: f64 },
}

impl QueryCall {
    pub fn kind(&self) -> QueryKind {
        match self {
            QueryCall::Aspect { .. } => QueryKind::Aspect,
            QueryCall::ExposureRanges { .. } => QueryKind::ExposureRanges,
            QueryCall::Shutdead { .. } => QueryKind::Shutdead,
            QueryCall::McatSources { .. } => QueryKind::McatSources,
            QueryCall::McatVisitSources { .. } => QueryKind::McatVisitSources,
        }
    }
}

/// Query adapter serving pre-fetched tables from memory.
///
/// Timestamps and aspect times are stored unscaled, in units of
/// `1 / tscale` seconds. Exposure timestamps are not tied to a sky
/// position: every position sees the same stream.
///
/// Dead time is modelled as a constant rate (dead seconds per second of
/// chunk) and a constant shutter-closed fraction.
///
/// # Example
///
/// ```
/// use galexdb::query::{Band, MemoryAdapter, QueryAdapter, QueryOptions};
///
/// let adapter = MemoryAdapter::new().with_dead_time(0.1, 0.0);
/// let dt = adapter.shutdead(Band::Nuv, 0.0, 100.0, &QueryOptions::default()).unwrap();
/// assert!((dt.dead_time - 10.0).abs() < 1e-12);
/// assert_eq!(adapter.call_count(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryAdapter {
    tscale: f64,
    timestamps: Vec<f64>,
    aspect: Vec<AspectRecord>,
    dead_rate: f64,
    shutter_closed_fraction: f64,
    sources: Vec<McatSource>,
    visit_sources: Vec<VisitSource>,
    failing: HashSet<QueryKind>,
    failing_shutdead_calls: HashSet<usize>,
    calls: Mutex<Vec<QueryCall>>,
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self {
            tscale: 1000.0,
            timestamps: Vec::new(),
            aspect: Vec::new(),
            dead_rate: 0.0,
            shutter_closed_fraction: 0.0,
            sources: Vec::new(),
            visit_sources: Vec::new(),
            failing: HashSet::new(),
            failing_shutdead_calls: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Scale of stored timestamps relative to seconds (default 1000).
    /// Set it before [`with_timestamps_seconds`](Self::with_timestamps_seconds).
    pub fn with_tscale(mut self, tscale: f64) -> Self {
        self.tscale = tscale;
        self
    }

    /// Exposure timestamps, unscaled.
    pub fn with_timestamps(mut self, timestamps: Vec<f64>) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Exposure timestamps given in seconds; scaled on insertion.
    pub fn with_timestamps_seconds(mut self, seconds: &[f64]) -> Self {
        self.timestamps = seconds.iter().map(|t| t * self.tscale).collect();
        self
    }

    pub fn with_aspect(mut self, aspect: Vec<AspectRecord>) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn with_dead_time(mut self, dead_rate: f64, shutter_closed_fraction: f64) -> Self {
        self.dead_rate = dead_rate;
        self.shutter_closed_fraction = shutter_closed_fraction;
        self
    }

    pub fn with_sources(mut self, sources: Vec<McatSource>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_visit_sources(mut self, visit_sources: Vec<VisitSource>) -> Self {
        self.visit_sources = visit_sources;
        self
    }

    /// Makes every call of `kind` fail with [`QueryError::RetriesExhausted`].
    pub fn failing(mut self, kind: QueryKind) -> Self {
        self.failing.insert(kind);
        self
    }

    /// Makes the `n`-th shutdead call (zero-based) fail.
    pub fn failing_shutdead_call(mut self, n: usize) -> Self {
        self.failing_shutdead_calls.insert(n);
        self
    }

    /// Snapshot of all calls made so far.
    pub fn calls(&self) -> Vec<QueryCall> {
        self.lock_calls().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    pub fn calls_of(&self, kind: QueryKind) -> Vec<QueryCall> {
        self.lock_calls()
            .iter()
            .filter(|c| c.kind() == kind)
            .cloned()
            .collect()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<QueryCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records the call and returns the number of earlier calls of the same kind.
    fn record(&self, call: QueryCall) -> usize {
        let mut calls = self.lock_calls();
        let kind = call.kind();
        let prior = calls.iter().filter(|c| c.kind() == kind).count();
        debug!("memory adapter: {:?}", call);
        calls.push(call);
        prior
    }

    fn check(&self, kind: QueryKind, opts: &QueryOptions) -> QueryResult<()> {
        if self.failing.contains(&kind) {
            Err(QueryError::RetriesExhausted {
                attempts: opts.retries,
            })
        } else {
            Ok(())
        }
    }
}

impl QueryAdapter for MemoryAdapter {
    fn aspect(&self, t0: f64, t1: f64, opts: &QueryOptions) -> QueryResult<Vec<AspectRecord>> {
        self.record(QueryCall::Aspect { t0, t1 });
        self.check(QueryKind::Aspect, opts)?;
        let (lo, hi) = (t0 * self.tscale, t1 * self.tscale);
        Ok(self
            .aspect
            .iter()
            .filter(|a| a.t >= lo && a.t <= hi)
            .cloned()
            .collect())
    }

    fn exposure_ranges(
        &self,
        request: &ExposureRangeRequest,
        opts: &QueryOptions,
    ) -> QueryResult<Vec<f64>> {
        self.record(QueryCall::ExposureRanges {
            band: request.band,
            t0: request.t0,
            t1: request.t1,
        });
        self.check(QueryKind::ExposureRanges, opts)?;
        let (lo, hi) = (request.t0 * request.tscale, request.t1 * request.tscale);
        Ok(self
            .timestamps
            .iter()
            .copied()
            .filter(|t| *t >= lo && *t <= hi)
            .collect())
    }

    fn shutdead(
        &self,
        band: Band,
        t0: f64,
        t1: f64,
        opts: &QueryOptions,
    ) -> QueryResult<DeadTime> {
        let prior = self.record(QueryCall::Shutdead { band, t0, t1 });
        self.check(QueryKind::Shutdead, opts)?;
        if self.failing_shutdead_calls.contains(&prior) {
            return Err(QueryError::Transport(format!(
                "shutdead call {} rejected",
                prior
            )));
        }
        Ok(DeadTime {
            dead_time: self.dead_rate * (t1 - t0),
            shutter_closed_fraction: self.shutter_closed_fraction,
        })
    }

    fn mcat_sources(
        &self,
        band: Band,
        position: SkyPosition,
        radius: f64,
        maglimit: f64,
        opts: &QueryOptions,
    ) -> QueryResult<Vec<McatSource>> {
        self.record(QueryCall::McatSources {
            band,
            position,
            radius,
            maglimit,
        });
        self.check(QueryKind::McatSources, opts)?;
        Ok(self
            .sources
            .iter()
            .filter(|s| position.distance_to(&s.position()) <= radius)
            .filter(|s| s.mag(band) > 0.0 && s.mag(band) < maglimit)
            .cloned()
            .collect())
    }

    fn mcat_visit_sources(
        &self,
        position: SkyPosition,
        radius: f64,
        opts: &QueryOptions,
    ) -> QueryResult<Vec<VisitSource>> {
        self.record(QueryCall::McatVisitSources { position, radius });
        self.check(QueryKind::McatVisitSources, opts)?;
        Ok(self
            .visit_sources
            .iter()
            .filter(|s| position.distance_to(&SkyPosition::new(s.ra, s.dec)) <= radius)
            .cloned()
            .collect())
    }
}
