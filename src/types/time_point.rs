//! Recorded marks.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A labeled instant, expressed as an offset from the first mark of its timer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimePoint {
    /// Seconds since the timer's first mark. The first mark is always `0.0`.
    pub offset_seconds: f64,
    pub label: String,
}

impl TimePoint {
    pub fn new(offset_seconds: f64, label: impl Into<String>) -> Self {
        TimePoint {
            offset_seconds,
            label: label.into(),
        }
    }
}

impl Display for TimePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.label.is_empty() {
            write!(f, "{:.6}s", self.offset_seconds)
        } else {
            write!(f, "{:.6}s {}", self.offset_seconds, self.label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_point_display() {
        let point = TimePoint::new(1.5, "parse end");
        assert_eq!(point.to_string(), "1.500000s parse end");
    }

    #[test]
    fn test_time_point_display_unlabeled() {
        assert_eq!(TimePoint::new(0.0, "").to_string(), "0.000000s");
    }

    #[test]
    fn test_time_point_serialization() {
        let point = TimePoint::new(3.0, "Second");
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["offset_seconds"], 3.0);
        assert_eq!(json["label"], "Second");
        let back: TimePoint = serde_json::from_value(json).unwrap();
        assert_eq!(back, point);
    }
}
