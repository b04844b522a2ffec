//! Chunked effective-exposure integration over one window.

use log::debug;
use qtty::{Second, Seconds};

use crate::query::{Band, QueryAdapter, QueryOptions, QueryResult};
use crate::windows::Interval;

/// Splits `window` into chunk boundaries no query has to span more than
/// roughly `chunk_size` seconds of.
///
/// A window no longer than `chunk_size` is returned as its two endpoints.
/// Longer windows get `ceil(duration / chunk_size)` evenly spaced
/// boundaries from start to end inclusive. A `chunk_size` that is not a
/// finite positive number leaves the window whole.
pub fn chunk_boundaries(window: Interval<Second>, chunk_size: f64) -> Vec<f64> {
    let (t0, t1) = (window.start().value(), window.end().value());
    let duration = t1 - t0;
    if !(chunk_size.is_finite() && chunk_size > 0.0) || duration <= chunk_size {
        return vec![t0, t1];
    }
    let num = (duration / chunk_size).ceil() as usize;
    let step = duration / (num - 1) as f64;
    (0..num)
        .map(|i| if i + 1 == num { t1 } else { t0 + step * i as f64 })
        .collect()
}

/// Effective exposure over one chunk.
///
/// The raw span is reduced by the shutter-closed fraction and then by the
/// detector dead time, floored at zero. A zero-length chunk returns zero
/// without querying.
pub fn exposure(
    adapter: &dyn QueryAdapter,
    band: Band,
    chunk: Interval<Second>,
    opts: &QueryOptions,
) -> QueryResult<Seconds> {
    let raw = chunk.duration().value();
    if raw <= 0.0 {
        return Ok(Seconds::new(0.0));
    }
    let dt = adapter.shutdead(band, chunk.start().value(), chunk.end().value(), opts)?;
    let effective = raw * (1.0 - dt.shutter_closed_fraction) - dt.dead_time;
    Ok(Seconds::new(effective.max(0.0)))
}

/// Effective exposure over a whole window, one query per chunk.
///
/// Stops at the first failing chunk.
pub fn window_exposure(
    adapter: &dyn QueryAdapter,
    band: Band,
    window: Interval<Second>,
    chunk_size: f64,
    opts: &QueryOptions,
) -> QueryResult<Seconds> {
    let bounds = chunk_boundaries(window, chunk_size);
    debug!("{} split into {} chunks", window, bounds.len() - 1);
    bounds.windows(2).try_fold(Seconds::new(0.0), |acc, pair| {
        let chunk = Interval::from_f64(pair[0], pair[1]);
        Ok(acc + exposure(adapter, band, chunk, opts)?)
    })
}
