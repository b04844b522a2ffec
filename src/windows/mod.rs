//! Exposure windows: interval types and contiguous-window reconstruction.
//!
//! [`reconstruct`] is the pure algorithm over a timestamp slice;
//! [`time_ranges`] feeds it from the query adapter and reports the outcome
//! as a [`WindowOutcome`].

mod interval;
mod interval_set;
mod ranges;
mod reconstruct;

pub use interval::Interval;
pub use interval_set::{is_canonical, IntervalSet};
pub use ranges::{time_ranges, WindowOutcome, MISSION_RANGE};
pub use reconstruct::reconstruct;
