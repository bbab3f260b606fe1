//! Labeled execution marks with derived, filterable durations.
//!
//! An [`ExecutionTimer`] records a [`TimePoint`] every time [`mark`] is
//! called. Consecutive marks form [`Duration`]s, which can be selected by
//! label with a [`DurationFilter`] and summed or aggregated.
//!
//! ```rust
//! use execution_timer::{DurationFilter, ExecutionTimer, MatchCondition, TimeSourceKind};
//!
//! let timer = ExecutionTimer::new(TimeSourceKind::Monotonic);
//! for _ in 0..3 {
//!     timer.mark("generate");
//!     let mut values: Vec<u32> = (0..100).rev().collect();
//!     timer.measure("sort begin", "sort end", || values.sort());
//! }
//! let sorting = DurationFilter::start_label(MatchCondition::Exact("sort begin".into()));
//! assert_eq!(timer.durations_matching(&sorting).len(), 3);
//! ```
//!
//! [`mark`]: ExecutionTimer::mark

pub use error::TimerError;
pub use guard::MarkGuard;
pub use source::{CpuTimeSource, MonotonicSource, SequenceSource, TimeSource, TimeSourceKind};
pub use timer::ExecutionTimer;
pub use types::{
    Duration, DurationFilter, DurationStats, LabelTarget, MatchCondition, TimePoint, TimerReport,
};

#[cfg(feature = "bench-internal")]
#[doc(hidden)]
pub mod bench_helpers;
mod error;
mod guard;
pub mod source;
mod timer;
pub mod types;

#[cfg(test)]
mod tests;
