use std::sync::Arc;

use crate::source::{SequenceSource, TimeSourceKind};
use crate::timer::ExecutionTimer;
use crate::types::{DurationFilter, MatchCondition};

// This module exists to keep benchmarks small, targeted, and stable.
// - Bench code lives in benches/ and drives real timers through these helpers.
// - They are compiled only with the `bench-internal` feature, so they never
//   show up in normal builds or the public docs.

/// A scripted timer with `marks` marks alternating between two labels.
pub fn prepared_timer(marks: usize) -> ExecutionTimer {
    let source = Arc::new(SequenceSource::new((0..marks).map(|i| i as f64 * 0.5)));
    let timer = ExecutionTimer::with_source(TimeSourceKind::Monotonic, source);
    for i in 0..marks {
        timer.mark(if i % 2 == 0 { "SORT BEGIN" } else { "SORT END" });
    }
    timer
}

pub fn mark_overhead(kind: TimeSourceKind, iters: usize) -> usize {
    let timer = ExecutionTimer::new(kind);
    for _ in 0..iters {
        timer.mark("bench");
    }
    timer.len()
}

pub fn measure_overhead(iters: usize) -> usize {
    let timer = ExecutionTimer::default();
    for _ in 0..iters {
        timer.measure("start", "end", || ());
    }
    timer.len()
}

pub fn derive_durations(timer: &ExecutionTimer) -> usize {
    timer.durations().len()
}

pub fn sum_exact(timer: &ExecutionTimer) -> f64 {
    let filter = DurationFilter::start_label(MatchCondition::Exact("SORT BEGIN".to_string()));
    timer.sum_durations(&filter)
}

pub fn sum_regex(timer: &ExecutionTimer) -> f64 {
    let condition = MatchCondition::regex("^SORT.*BEGIN$").expect("benchmark pattern must compile");
    let filter = DurationFilter::start_label(condition);
    timer.sum_durations(&filter)
}
