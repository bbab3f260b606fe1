//! Aggregates over a set of durations.

use serde::{Deserialize, Serialize};

use super::Duration;

/// Count, total and extremes of a non-empty set of durations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    pub count: usize,
    pub total: f64,
    pub min: f64,
    pub max: f64,
}

impl DurationStats {
    /// Aggregate `durations`, or `None` if there are none.
    pub fn from_durations<'a>(durations: impl IntoIterator<Item = &'a Duration>) -> Option<Self> {
        durations.into_iter().fold(None, |acc, duration| {
            let seconds = duration.seconds;
            Some(match acc {
                None => DurationStats {
                    count: 1,
                    total: seconds,
                    min: seconds,
                    max: seconds,
                },
                Some(stats) => DurationStats {
                    count: stats.count + 1,
                    total: stats.total + seconds,
                    min: stats.min.min(seconds),
                    max: stats.max.max(seconds),
                },
            })
        })
    }

    pub fn mean(&self) -> f64 {
        self.total / self.count as f64
    }
}
