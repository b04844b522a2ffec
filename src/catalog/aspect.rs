//! Aspect-solution retrieval.

use crate::query::{AspectRecord, QueryAdapter, QueryOptions, QueryResult};

/// Aspect solutions in `[t0, t1]` seconds, with `t` converted to seconds.
pub fn get_aspect(
    adapter: &dyn QueryAdapter,
    t0: f64,
    t1: f64,
    tscale: f64,
    opts: &QueryOptions,
) -> QueryResult<Vec<AspectRecord>> {
    let mut rows = adapter.aspect(t0, t1, opts)?;
    for row in &mut rows {
        row.t /= tscale;
    }
    Ok(rows)
}
