//! Closed time interval `[start, end]` on a `qtty` axis.

use std::fmt::Display;

use qtty::{Quantity, Unit};

/// Closed range `[start, end]`, one contiguous exposure window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<U: Unit> {
    start: Quantity<U>,
    end: Quantity<U>,
}

impl<U: Unit> Interval<U> {
    /// Creates interval `[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub const fn new(start: Quantity<U>, end: Quantity<U>) -> Self {
        assert!(
            start.value() <= end.value(),
            "Interval start must be <= end"
        );
        Self { start, end }
    }

    pub const fn from_f64(start: f64, end: f64) -> Self {
        Self::new(Quantity::<U>::new(start), Quantity::<U>::new(end))
    }

    /// Non-panicking constructor for values coming from query responses.
    ///
    /// Returns `None` when `start > end` or either bound is NaN.
    pub fn try_new(start: f64, end: f64) -> Option<Self> {
        if start <= end {
            Some(Self::from_f64(start, end))
        } else {
            None
        }
    }

    pub const fn start(&self) -> Quantity<U> {
        self.start
    }

    pub const fn end(&self) -> Quantity<U> {
        self.end
    }

    pub fn duration(&self) -> Quantity<U> {
        self.end - self.start
    }
}

impl<U: Unit> Display for Interval<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.start.value(), self.end.value())
    }
}

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for Interval<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start.value())?;
        s.serialize_field("end", &self.end.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for Interval<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            start: f64,
            end: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::try_new(raw.start, raw.end)
            .ok_or_else(|| serde::de::Error::custom("interval start must be <= end"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Second;

    #[test]
    fn test_interval_creation() {
        let interval = Interval::new(Quantity::<Second>::new(0.0), Quantity::<Second>::new(100.0));
        assert_eq!(interval.duration().value(), 100.0);
        assert_eq!(interval.start().value(), 0.0);
        assert_eq!(interval.end().value(), 100.0);
    }

    #[test]
    #[should_panic(expected = "Interval start must be <= end")]
    fn test_interval_rejects_reversed_bounds() {
        let _ = Interval::<Second>::from_f64(10.0, 5.0);
    }

    #[test]
    fn test_try_new() {
        assert!(Interval::<Second>::try_new(1.0, 1.0).is_some());
        assert!(Interval::<Second>::try_new(2.0, 1.0).is_none());
        assert!(Interval::<Second>::try_new(f64::NAN, 1.0).is_none());
    }

    #[test]
    fn test_display() {
        let interval = Interval::<Second>::from_f64(1.0, 2.5);
        assert_eq!(interval.to_string(), "[1.000, 2.500]");
    }
}
