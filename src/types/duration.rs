//! Intervals derived from consecutive marks.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use super::TimePoint;

/// The interval between two consecutive marks.
///
/// Timers derive these on demand; callers normally only construct one
/// directly for comparisons or placeholders.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Duration {
    pub seconds: f64,
    pub start_label: String,
    pub end_label: String,
}

impl Duration {
    pub fn new(seconds: f64, start_label: impl Into<String>, end_label: impl Into<String>) -> Self {
        Duration {
            seconds,
            start_label: start_label.into(),
            end_label: end_label.into(),
        }
    }

    /// The interval from `start` to `end`: `end.offset_seconds - start.offset_seconds`,
    /// carrying both labels.
    pub fn between(start: &TimePoint, end: &TimePoint) -> Self {
        Duration {
            seconds: end.offset_seconds - start.offset_seconds,
            start_label: start.label.clone(),
            end_label: end.label.clone(),
        }
    }

    /// Convert to a [`std::time::Duration`].
    ///
    /// Returns `None` when the interval is negative or not finite, which only
    /// happens with a clock that went backwards.
    pub fn to_std(&self) -> Option<std::time::Duration> {
        std::time::Duration::try_from_secs_f64(self.seconds).ok()
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{:.6}s [{:?} -> {:?}]",
            self.seconds, self.start_label, self.end_label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_between_time_points() {
        let start = TimePoint::new(3.0, "First");
        let end = TimePoint::new(7.0, "Second");
        assert_eq!(
            Duration::between(&start, &end),
            Duration::new(4.0, "First", "Second")
        );
    }

    #[test]
    fn test_duration_between_can_be_negative() {
        let start = TimePoint::new(5.0, "late");
        let end = TimePoint::new(2.0, "early");
        assert_eq!(Duration::between(&start, &end).seconds, -3.0);
    }

    #[test]
    fn test_default_duration_is_empty() {
        let duration = Duration::default();
        assert_eq!(duration.seconds, 0.0);
        assert!(duration.start_label.is_empty());
        assert!(duration.end_label.is_empty());
    }

    #[test]
    fn test_to_std() {
        let duration = Duration::new(1.25, "a", "b");
        assert_eq!(
            duration.to_std(),
            Some(std::time::Duration::from_millis(1250))
        );
        assert_eq!(Duration::new(-1.0, "a", "b").to_std(), None);
        assert_eq!(Duration::new(f64::NAN, "a", "b").to_std(), None);
    }

    #[test]
    fn test_duration_display() {
        let duration = Duration::new(0.5, "SORT BEGIN", "SORT END");
        assert_eq!(
            duration.to_string(),
            r#"0.500000s ["SORT BEGIN" -> "SORT END"]"#
        );
    }
}
