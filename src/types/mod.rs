//! Value types recorded and derived by a timer.
//!
//! Everything here is plain data: cheap to clone, serializable, and never
//! shared with the timer that produced it.

mod duration;
mod filter;
mod report;
mod stats;
mod time_point;

pub use duration::Duration;
pub use filter::{DurationFilter, LabelTarget, MatchCondition};
pub use report::TimerReport;
pub use stats::DurationStats;
pub use time_point::TimePoint;
