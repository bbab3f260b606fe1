//! Point-in-time snapshot of a timer, for printing or shipping elsewhere.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use super::{Duration, TimePoint};
use crate::error::TimerError;
use crate::source::TimeSourceKind;

/// Everything a timer has recorded, captured under a single lock acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerReport {
    pub time_source: TimeSourceKind,
    /// Raw reading of the first mark, `None` if nothing was marked.
    pub initial_time_point: Option<f64>,
    pub time_points: Vec<TimePoint>,
    pub durations: Vec<Duration>,
    /// Offset of the last mark.
    pub total_elapsed: f64,
}

impl TimerReport {
    pub fn to_json_pretty(&self) -> Result<String, TimerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Display for TimerReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(
            f,
            "{} marks over {:.6}s ({})",
            self.time_points.len(),
            self.total_elapsed,
            self.time_source
        )?;
        for point in &self.time_points {
            writeln!(f, "  {point}")?;
        }
        Ok(())
    }
}
