//! Ordered, strictly disjoint exposure windows.

use std::fmt::Display;
use std::ops::Deref;

use super::interval::Interval;
use qtty::{Quantity, Unit};

/// Windows sorted by start, each ending strictly before the next begins.
///
/// Reads go through `Deref<Target = [Interval<U>]>`. The only mutation is
/// [`retain`](IntervalSet::retain), which cannot break the ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSet<U: Unit>(Vec<Interval<U>>);

impl<U: Unit> IntervalSet<U> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wraps windows that are already sorted and disjoint.
    ///
    /// The ordering is only checked in debug builds.
    pub fn from_sorted_unchecked(vec: Vec<Interval<U>>) -> Self {
        debug_assert!(
            is_canonical(&vec),
            "IntervalSet::from_sorted_unchecked called with non-canonical input"
        );
        Self(vec)
    }

    /// Keeps the windows for which `f` returns `true`.
    pub fn retain<F: FnMut(&Interval<U>) -> bool>(&mut self, f: F) {
        self.0.retain(f);
    }

    /// Summed duration of all windows.
    pub fn total_duration(&self) -> Quantity<U> {
        self.0
            .iter()
            .fold(Quantity::new(0.0), |acc, iv| acc + iv.duration())
    }
}

/// True if `intervals` is sorted by start and no two of them touch.
pub fn is_canonical<U: Unit>(intervals: &[Interval<U>]) -> bool {
    intervals
        .windows(2)
        .all(|w| w[0].end().value() < w[1].start().value())
}

impl<U: Unit> Deref for IntervalSet<U> {
    type Target = [Interval<U>];

    fn deref(&self) -> &[Interval<U>] {
        &self.0
    }
}

impl<U: Unit> From<Interval<U>> for IntervalSet<U> {
    fn from(interval: Interval<U>) -> Self {
        Self(vec![interval])
    }
}

impl<U: Unit> IntoIterator for IntervalSet<U> {
    type Item = Interval<U>;
    type IntoIter = std::vec::IntoIter<Interval<U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, U: Unit> IntoIterator for &'a IntervalSet<U> {
    type Item = &'a Interval<U>;
    type IntoIter = std::slice::Iter<'a, Interval<U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<U: Unit> Default for IntervalSet<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Unit> Display for IntervalSet<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, window) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", window)?;
        }
        f.write_str("}")
    }
}

/// Lets tests compare against a literal `vec![...]`.
impl<U: Unit> PartialEq<Vec<Interval<U>>> for IntervalSet<U> {
    fn eq(&self, other: &Vec<Interval<U>>) -> bool {
        self.0 == *other
    }
}

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for IntervalSet<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for IntervalSet<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let windows = Vec::<Interval<U>>::deserialize(deserializer)?;
        if !is_canonical(&windows) {
            return Err(serde::de::Error::custom(
                "windows must be sorted and disjoint",
            ));
        }
        Ok(Self(windows))
    }
}
