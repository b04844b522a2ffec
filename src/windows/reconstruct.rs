//! Contiguous exposure-window reconstruction.
//!
//! A timestamp stream is split wherever two consecutive (sorted) samples are
//! more than `maxgap` seconds apart. Each run becomes the window
//! `[first sample, last sample]`. When the stream splits into several runs,
//! runs shorter than `minexp` are dropped. A stream with no split is always
//! reported as one window, padded to one second when every sample carries
//! the same time.
//!
//! Only first differences are thresholded: samples inside a run are never
//! inspected again, so a run is not a gap-aware merge of sub-windows.

use qtty::Second;

use super::{Interval, IntervalSet};

/// Reconstructs disjoint exposure windows from `timestamps` (seconds).
///
/// Non-finite samples are ignored. A negative `maxgap` behaves like `0`.
///
/// # Example
///
/// ```
/// use galexdb::windows::{reconstruct, Interval};
///
/// let windows = reconstruct(&[0.0, 1.0, 2.0, 10.0, 11.0, 12.0], 2.0, 1.0);
/// assert_eq!(windows, vec![Interval::from_f64(0.0, 2.0), Interval::from_f64(10.0, 12.0)]);
/// ```
pub fn reconstruct(timestamps: &[f64], maxgap: f64, minexp: f64) -> IntervalSet<Second> {
    let mut times: Vec<f64> = timestamps.iter().copied().filter(|t| t.is_finite()).collect();
    if times.is_empty() {
        return IntervalSet::new();
    }
    times.sort_by(f64::total_cmp);
    let maxgap = maxgap.max(0.0);

    let runs = split_runs(&times, maxgap);
    if let [(start, end)] = runs.as_slice() {
        let end = if start == end { start + 1.0 } else { *end };
        return IntervalSet::from(Interval::from_f64(*start, end));
    }

    let mut windows = IntervalSet::from_sorted_unchecked(
        runs.into_iter()
            .map(|(start, end)| Interval::from_f64(start, end))
            .collect(),
    );
    windows.retain(|w| w.duration().value() >= minexp);
    windows
}

/// Splits sorted `times` into `(first, last)` runs at gaps wider than `maxgap`.
fn split_runs(times: &[f64], maxgap: f64) -> Vec<(f64, f64)> {
    let mut runs = Vec::new();
    let mut run_start = times[0];
    for pair in times.windows(2) {
        if pair[1] - pair[0] > maxgap {
            runs.push((run_start, pair[0]));
            run_start = pair[1];
        }
    }
    if let Some(last) = times.last() {
        runs.push((run_start, *last));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn iv(start: f64, end: f64) -> Interval<Second> {
        Interval::from_f64(start, end)
    }

    #[test]
    fn splits_on_gap() {
        let windows = reconstruct(&[0.0, 1.0, 2.0, 10.0, 11.0, 12.0], 2.0, 1.0);
        assert_eq!(windows, vec![iv(0.0, 2.0), iv(10.0, 12.0)]);
    }

    #[test]
    fn identical_samples_get_one_second() {
        assert_eq!(reconstruct(&[5.0, 5.0, 5.0], 1.0, 1.0), vec![iv(5.0, 6.0)]);
        assert_eq!(reconstruct(&[5.0], 100.0, 1.0), vec![iv(5.0, 6.0)]);
    }

    #[test]
    fn no_gap_spans_min_to_max() {
        assert_eq!(reconstruct(&[3.0, 1.0, 2.0, 4.0], 1.0, 1.0), vec![iv(1.0, 4.0)]);
    }

    #[test]
    fn single_run_ignores_minexp() {
        assert_eq!(reconstruct(&[0.0, 0.5], 1.0, 10.0), vec![iv(0.0, 0.5)]);
    }

    #[test]
    fn short_runs_are_dropped() {
        // Middle run [20, 20.5] is shorter than minexp.
        let ts = [0.0, 1.0, 2.0, 20.0, 20.5, 40.0, 41.0, 42.0, 43.0];
        assert_eq!(reconstruct(&ts, 5.0, 1.0), vec![iv(0.0, 2.0), iv(40.0, 43.0)]);
    }

    #[test]
    fn isolated_samples_between_gaps_are_dropped() {
        let ts = [0.0, 1.0, 50.0, 100.0, 101.0];
        assert_eq!(reconstruct(&ts, 2.0, 1.0), vec![iv(0.0, 1.0), iv(100.0, 101.0)]);
    }

    #[test]
    fn all_runs_too_short_yields_empty() {
        assert!(reconstruct(&[0.0, 10.0, 20.0], 1.0, 1.0).is_empty());
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let ts = [12.0, 0.0, 11.0, 2.0, 10.0, 1.0];
        assert_eq!(reconstruct(&ts, 2.0, 1.0), vec![iv(0.0, 2.0), iv(10.0, 12.0)]);
    }

    #[test]
    fn empty_and_non_finite_input() {
        assert!(reconstruct(&[], 1.0, 1.0).is_empty());
        assert!(reconstruct(&[f64::NAN, f64::INFINITY], 1.0, 1.0).is_empty());
        assert_eq!(reconstruct(&[f64::NAN, 3.0, 4.0], 1.0, 1.0), vec![iv(3.0, 4.0)]);
    }

    #[test]
    fn gap_equal_to_maxgap_does_not_split() {
        assert_eq!(reconstruct(&[0.0, 2.0, 4.0], 2.0, 1.0), vec![iv(0.0, 4.0)]);
    }

    #[test]
    fn negative_maxgap_acts_as_zero() {
        let ts = [0.0, 0.0, 3.0, 3.0];
        assert_eq!(reconstruct(&ts, -5.0, 0.0), vec![iv(0.0, 0.0), iv(3.0, 3.0)]);
    }

    proptest! {
        #[test]
        fn no_gap_means_one_window(
            start in -1.0e6f64..1.0e6,
            steps in prop::collection::vec(0.0f64..0.9, 0..50),
        ) {
            let mut ts = vec![start];
            for step in &steps {
                let next = ts[ts.len() - 1] + step;
                ts.push(next);
            }
            let windows = reconstruct(&ts, 1.0, 1.0);
            prop_assert_eq!(windows.len(), 1);
            let min = ts[0];
            let max = ts[ts.len() - 1];
            let expected_end = if min == max { min + 1.0 } else { max };
            prop_assert_eq!(windows[0], iv(min, expected_end));
        }

        #[test]
        fn split_windows_are_long_disjoint_and_ordered(
            ts in prop::collection::vec(0.0f64..1000.0, 1..200),
            maxgap in 0.0f64..20.0,
            minexp in 0.0f64..20.0,
        ) {
            let windows = reconstruct(&ts, maxgap, minexp);
            let mut sorted = ts.clone();
            sorted.sort_by(f64::total_cmp);
            let split = sorted.windows(2).any(|w| w[1] - w[0] > maxgap);
            for w in windows.windows(2) {
                prop_assert!(w[0].end().value() < w[1].start().value());
            }
            if split {
                for w in windows.iter() {
                    prop_assert!(w.duration().value() >= minexp);
                }
            }
            for w in windows.iter() {
                prop_assert!(sorted.contains(&w.start().value()));
            }
        }
    }
}
