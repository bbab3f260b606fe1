//! Pluggable clocks queried by [`ExecutionTimer`](crate::ExecutionTimer).
//!
//! A timer reads exactly one capability from its source: "what time is it
//! now, in seconds". The value is only ever compared against other readings
//! from the same source, so the reference point is arbitrary.
//!
//! Two production sources are provided:
//!
//! * [`MonotonicSource`] - wall time on the monotonic clock, immune to
//!   system clock adjustments.
//! * [`CpuTimeSource`] - user-mode CPU time consumed by the process. It does
//!   not advance while the process sleeps or waits on I/O.
//!
//! [`SequenceSource`] replays scripted readings and is what tests inject to
//! make timings deterministic.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use nix::sys::resource::{UsageWho, getrusage};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::TimerError;

/// Which clock semantics a timer uses. Fixed for the lifetime of a timer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TimeSourceKind {
    /// Monotonic wall time.
    #[default]
    Monotonic,
    /// User-mode CPU time of the current process.
    #[serde(alias = "cpu")]
    #[strum(to_string = "cpu_utilization", serialize = "cpu")]
    CpuUtilization,
}

impl TimeSourceKind {
    /// Parse a kind from its textual form (`monotonic`, `cpu_utilization` or `cpu`).
    pub fn parse(text: &str) -> Result<Self, TimerError> {
        text.trim()
            .parse()
            .map_err(|_| TimerError::UnknownTimeSource(text.to_string()))
    }

    /// Build the standard source for this kind.
    pub fn source(self) -> Arc<dyn TimeSource> {
        match self {
            TimeSourceKind::Monotonic => Arc::new(MonotonicSource),
            TimeSourceKind::CpuUtilization => Arc::new(CpuTimeSource),
        }
    }
}

/// A clock readable from any thread.
///
/// Implementations must be cheap and side-effect free apart from reading the
/// clock: a timer calls [`TimeSource::now`] while holding its internal lock.
/// A failure to read the clock is not a recoverable condition and should
/// panic rather than return a made-up value.
pub trait TimeSource: Send + Sync {
    /// Current reading in seconds.
    fn now(&self) -> f64;
}

static MONOTONIC_ANCHOR: Lazy<Instant> = Lazy::new(Instant::now);

/// Seconds on the monotonic clock since the first monotonic reading in this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicSource;

impl TimeSource for MonotonicSource {
    fn now(&self) -> f64 {
        MONOTONIC_ANCHOR.elapsed().as_secs_f64()
    }
}

/// Accumulated user-mode CPU seconds of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuTimeSource;

impl TimeSource for CpuTimeSource {
    /// # Panics
    ///
    /// Panics if `getrusage(RUSAGE_SELF)` fails, which the OS only does for
    /// invalid arguments.
    fn now(&self) -> f64 {
        let usage = getrusage(UsageWho::RUSAGE_SELF)
            .unwrap_or_else(|err| panic!("getrusage(RUSAGE_SELF) failed: {err}"));
        let user = usage.user_time();
        user.tv_sec() as f64 + user.tv_usec() as f64 / 1_000_000.0
    }
}

#[derive(Debug, Default)]
struct Script {
    pending: VecDeque<f64>,
    last: f64,
}

/// Replays a scripted sequence of readings, one per call to [`TimeSource::now`].
///
/// Once the script runs dry the last value handed out is repeated, so a
/// drained source behaves like a stopped clock. A source that never had a
/// value reads `0.0`.
///
/// ```rust
/// use std::sync::Arc;
/// use execution_timer::{ExecutionTimer, SequenceSource, TimeSourceKind};
///
/// let source = Arc::new(SequenceSource::new([3.0, 6.0]));
/// let timer = ExecutionTimer::with_source(TimeSourceKind::Monotonic, source.clone());
/// timer.mark("a");
/// timer.mark("b");
/// assert_eq!(timer.durations()[0].seconds, 3.0);
/// ```
#[derive(Debug, Default)]
pub struct SequenceSource {
    script: Mutex<Script>,
}

impl SequenceSource {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: Mutex::new(Script {
                pending: values.into_iter().collect(),
                last: 0.0,
            }),
        }
    }

    /// Replace whatever is left of the script with a single reading.
    pub fn set(&self, value: f64) {
        let mut script = self.script.lock();
        script.pending.clear();
        script.pending.push_back(value);
    }

    pub fn push(&self, value: f64) {
        self.script.lock().pending.push_back(value);
    }

    pub fn extend(&self, values: impl IntoIterator<Item = f64>) {
        self.script.lock().pending.extend(values);
    }

    /// Number of scripted readings not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().pending.len()
    }
}

impl TimeSource for SequenceSource {
    fn now(&self) -> f64 {
        let mut script = self.script.lock();
        if let Some(value) = script.pending.pop_front() {
            script.last = value;
        }
        script.last
    }
}
