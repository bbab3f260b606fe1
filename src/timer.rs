use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use itertools::Itertools;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::guard::MarkGuard;
use crate::source::{TimeSource, TimeSourceKind};
use crate::types::{Duration, DurationFilter, DurationStats, TimePoint, TimerReport};

/// Marks recorded so far, plus the raw reading they are relative to.
///
/// Both live behind one lock: deciding whether a mark is the first one and
/// appending it must be a single step.
#[derive(Debug, Default)]
struct TimePoints {
    initial: Option<f64>,
    points: Vec<TimePoint>,
}

impl TimePoints {
    fn record(&mut self, raw: f64, label: String) {
        let initial = match self.initial {
            Some(initial) => initial,
            None => {
                debug!(event = "Mark", phase = "Baseline", raw, label = %label);
                self.initial = Some(raw);
                raw
            }
        };

        let offset_seconds = raw - initial;
        if let Some(previous) = self.points.last() {
            if offset_seconds < previous.offset_seconds {
                warn!(
                    event = "Mark",
                    phase = "NonMonotonic",
                    label = %label,
                    previous = previous.offset_seconds,
                    offset = offset_seconds
                );
            }
        }
        trace!(event = "Mark", phase = "Append", label = %label, offset = offset_seconds);

        self.points.push(TimePoint {
            offset_seconds,
            label,
        });
    }

    fn durations(&self) -> Vec<Duration> {
        self.points
            .iter()
            .tuple_windows()
            .map(|(start, end)| Duration::between(start, end))
            .collect()
    }

    fn total_elapsed(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.offset_seconds)
    }
}

/// Records labeled marks and derives the durations between them.
///
/// Thread-safe: share it with `Arc` (or a scoped borrow) and call [`mark`]
/// from as many threads as needed. Every accessor returns a consistent
/// snapshot; durations are recomputed on each call, so they always reflect
/// the latest marks.
///
/// ```rust
/// use execution_timer::{DurationFilter, ExecutionTimer, MatchCondition};
///
/// let timer = ExecutionTimer::default();
/// timer.measure("SORT BEGIN", "SORT END", || {
///     let mut values = vec![3, 1, 2];
///     values.sort();
/// });
/// let filter = DurationFilter::start_label(MatchCondition::Exact("SORT BEGIN".into()));
/// assert_eq!(timer.durations_matching(&filter).len(), 1);
/// assert!(timer.sum_durations(&filter) >= 0.0);
/// ```
///
/// [`mark`]: ExecutionTimer::mark
pub struct ExecutionTimer {
    kind: TimeSourceKind,
    source: Arc<dyn TimeSource>,
    inner: Mutex<TimePoints>,
}

impl ExecutionTimer {
    /// A timer reading the standard clock for `kind`.
    pub fn new(kind: TimeSourceKind) -> Self {
        Self::with_source(kind, kind.source())
    }

    /// A timer reading an arbitrary source, e.g. a
    /// [`SequenceSource`](crate::SequenceSource) in tests.
    ///
    /// `kind` is only reported back by [`time_source_kind`](Self::time_source_kind);
    /// the readings come from `source`.
    pub fn with_source(kind: TimeSourceKind, source: Arc<dyn TimeSource>) -> Self {
        ExecutionTimer {
            kind,
            source,
            inner: Mutex::new(TimePoints::default()),
        }
    }

    pub fn time_source_kind(&self) -> TimeSourceKind {
        self.kind
    }

    /// Record a mark at the current time.
    ///
    /// The clock is read while the internal lock is held, so concurrent
    /// marks are appended in the order their readings were taken.
    pub fn mark(&self, label: impl Into<String>) {
        let label = label.into();
        let mut inner = self.inner.lock();
        let raw = self.source.now();
        inner.record(raw, label);
    }

    pub fn mark_unlabeled(&self) {
        self.mark(String::new());
    }

    /// All marks so far, in recording order.
    pub fn relative_time_points(&self) -> Vec<TimePoint> {
        self.inner.lock().points.clone()
    }

    /// Raw clock reading of the first mark, `None` until something is marked.
    pub fn initial_time_point(&self) -> Option<f64> {
        self.inner.lock().initial
    }

    pub fn len(&self) -> usize {
        self.inner.lock().points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().points.is_empty()
    }

    /// Offset of the most recent mark, `0.0` for an empty timer.
    pub fn total_elapsed(&self) -> f64 {
        self.inner.lock().total_elapsed()
    }

    /// One duration per pair of consecutive marks.
    pub fn durations(&self) -> Vec<Duration> {
        self.inner.lock().durations()
    }

    pub fn durations_matching(&self, filter: &DurationFilter) -> Vec<Duration> {
        self.durations()
            .into_iter()
            .filter(|d| filter.matches(d))
            .collect()
    }

    /// Sum of the seconds of every duration matching `filter`.
    pub fn sum_durations(&self, filter: &DurationFilter) -> f64 {
        self.durations()
            .iter()
            .filter(|d| filter.matches(d))
            .fold(0.0, |sum, d| sum + d.seconds)
    }

    /// Count, total and extremes of the durations matching `filter`.
    pub fn stats(&self, filter: &DurationFilter) -> Option<DurationStats> {
        DurationStats::from_durations(&self.durations_matching(filter))
    }

    /// Mark `start_label` now and `end_label` when the returned guard drops.
    pub fn scope(
        &self,
        start_label: impl Into<String>,
        end_label: impl Into<String>,
    ) -> MarkGuard<'_> {
        MarkGuard::new(self, start_label, end_label)
    }

    /// Time `action`, bracketing it with `start_label` and `end_label` marks.
    ///
    /// The action runs on the calling thread, outside the timer's lock.
    pub fn measure<R>(
        &self,
        start_label: impl Into<String>,
        end_label: impl Into<String>,
        action: impl FnOnce() -> R,
    ) -> R {
        let _scope = self.scope(start_label, end_label);
        action()
    }

    /// Time a fallible `action`.
    ///
    /// The end mark is recorded whether the action succeeds, fails or
    /// panics; the action's result is then handed back unchanged.
    pub fn try_measure<T, E>(
        &self,
        start_label: impl Into<String>,
        end_label: impl Into<String>,
        action: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let scope = self.scope(start_label, end_label);
        let result = action();
        scope.finish();
        if result.is_err() {
            debug!(event = "Scope", phase = "Failed", marks = self.len());
        }
        result
    }

    /// A consistent snapshot of everything recorded so far.
    pub fn report(&self) -> TimerReport {
        let inner = self.inner.lock();
        TimerReport {
            time_source: self.kind,
            initial_time_point: inner.initial,
            time_points: inner.points.clone(),
            durations: inner.durations(),
            total_elapsed: inner.total_elapsed(),
        }
    }
}

impl Default for ExecutionTimer {
    fn default() -> Self {
        Self::new(TimeSourceKind::default())
    }
}

impl Debug for ExecutionTimer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let inner = self.inner.lock();
        f.debug_struct("ExecutionTimer")
            .field("kind", &self.kind)
            .field("initial", &inner.initial)
            .field("marks", &inner.points.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SequenceSource;
    use crate::types::MatchCondition;
    use yare::parameterized;

    fn scripted(readings: &[f64]) -> (ExecutionTimer, Arc<SequenceSource>) {
        let source = Arc::new(SequenceSource::new(readings.iter().copied()));
        let timer = ExecutionTimer::with_source(TimeSourceKind::Monotonic, source.clone());
        (timer, source)
    }

    fn end_suffix(suffix: &str) -> DurationFilter {
        DurationFilter::end_label(MatchCondition::Suffix(suffix.to_string()))
    }

    #[parameterized(
        monotonic = { TimeSourceKind::Monotonic },
        cpu = { TimeSourceKind::CpuUtilization },
    )]
    fn test_time_source_kind_is_kept(kind: TimeSourceKind) {
        assert_eq!(ExecutionTimer::new(kind).time_source_kind(), kind);
        let (timer, _) = scripted(&[]);
        assert_eq!(timer.time_source_kind(), TimeSourceKind::Monotonic);
    }

    #[test]
    fn test_empty_timer() {
        let (timer, _) = scripted(&[]);
        assert!(timer.is_empty());
        assert!(timer.relative_time_points().is_empty());
        assert!(timer.durations().is_empty());
        assert_eq!(timer.initial_time_point(), None);
        assert_eq!(timer.total_elapsed(), 0.0);
        assert_eq!(timer.sum_durations(&end_suffix("")), 0.0);
    }

    #[test]
    fn test_one_mark() {
        let (timer, source) = scripted(&[]);
        source.set(3.0);
        timer.mark_unlabeled();
        assert_eq!(timer.initial_time_point(), Some(3.0));
        assert_eq!(timer.relative_time_points(), vec![TimePoint::new(0.0, "")]);
        assert!(timer.durations().is_empty());
        assert_eq!(timer.sum_durations(&end_suffix("")), 0.0);
    }

    #[test]
    fn test_two_marks() {
        let (timer, source) = scripted(&[]);
        source.set(3.0);
        timer.mark_unlabeled();
        source.set(6.0);
        timer.mark_unlabeled();
        assert_eq!(timer.initial_time_point(), Some(3.0));
        assert_eq!(
            timer.relative_time_points(),
            vec![TimePoint::new(0.0, ""), TimePoint::new(3.0, "")]
        );
        assert_eq!(timer.durations(), vec![Duration::new(3.0, "", "")]);
    }

    #[test]
    fn test_three_labeled_marks() {
        let (timer, _) = scripted(&[3.0, 6.0, 10.0]);
        timer.mark("First");
        timer.mark("Second");
        timer.mark_unlabeled();
        assert_eq!(timer.initial_time_point(), Some(3.0));
        assert_eq!(
            timer.relative_time_points(),
            vec![
                TimePoint::new(0.0, "First"),
                TimePoint::new(3.0, "Second"),
                TimePoint::new(7.0, ""),
            ]
        );
        assert_eq!(
            timer.durations(),
            vec![
                Duration::new(3.0, "First", "Second"),
                Duration::new(4.0, "Second", ""),
            ]
        );
        assert_eq!(timer.total_elapsed(), 7.0);
    }

    #[parameterized(
        matching_suffix = { "cond", 6.0 },
        no_match = { "foo", 0.0 },
        everything = { "", 10.0 },
    )]
    fn test_sum_durations(suffix: &str, expected: f64) {
        let (timer, _) = scripted(&[3.0, 6.0, 10.0, 13.0]);
        timer.mark("First");
        timer.mark("Second");
        timer.mark("");
        timer.mark("Second");
        assert_eq!(timer.sum_durations(&end_suffix(suffix)), expected);
    }

    #[test]
    fn test_first_offset_is_zero_for_any_reading() {
        for raw in [-5.0, 0.0, 1e9] {
            let (timer, _) = scripted(&[raw]);
            timer.mark("only");
            assert_eq!(timer.relative_time_points()[0].offset_seconds, 0.0);
            assert_eq!(timer.initial_time_point(), Some(raw));
        }
    }

    #[test]
    fn test_decreasing_source_gives_negative_offsets() {
        let (timer, _) = scripted(&[10.0, 8.0]);
        timer.mark("a");
        timer.mark("b");
        assert_eq!(timer.relative_time_points()[1].offset_seconds, -2.0);
        assert_eq!(timer.durations()[0].seconds, -2.0);
    }

    #[test]
    fn test_durations_reflect_new_marks() {
        let (timer, _) = scripted(&[0.0, 1.0, 3.0]);
        timer.mark("a");
        timer.mark("b");
        assert_eq!(timer.durations().len(), 1);
        assert_eq!(timer.durations(), timer.durations());
        timer.mark("c");
        assert_eq!(timer.durations().len(), 2);
    }

    #[test]
    fn test_durations_matching_preserves_order() {
        let (timer, _) = scripted(&[0.0, 1.0, 2.0, 4.0, 8.0]);
        timer.mark("x start");
        timer.mark("x end");
        timer.mark("y start");
        timer.mark("x end");
        timer.mark("z");
        let filter = DurationFilter::end_label(MatchCondition::Exact("x end".into()));
        assert_eq!(
            timer.durations_matching(&filter),
            vec![
                Duration::new(1.0, "x start", "x end"),
                Duration::new(2.0, "y start", "x end"),
            ]
        );
    }

    #[test]
    fn test_stats() {
        let (timer, _) = scripted(&[0.0, 1.0, 2.0, 5.0]);
        timer.mark("run");
        timer.mark("gap");
        timer.mark("run");
        timer.mark("gap");
        let filter = DurationFilter::start_label(MatchCondition::Exact("run".into()));
        let stats = timer.stats(&filter).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total, 4.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        let none = DurationFilter::start_label(MatchCondition::Exact("nothing".into()));
        assert_eq!(timer.stats(&none), None);
    }

    #[test]
    fn test_measure_returns_value() {
        let (timer, _) = scripted(&[1.0, 3.0]);
        let value = timer.measure("start", "end", || 42);
        assert_eq!(value, 42);
        assert_eq!(timer.durations(), vec![Duration::new(2.0, "start", "end")]);
    }

    #[test]
    fn test_try_measure_success() {
        let (timer, _) = scripted(&[1.0, 2.0]);
        let result: Result<&str, String> = timer.try_measure("start", "end", || Ok("done"));
        assert_eq!(result, Ok("done"));
        assert_eq!(timer.len(), 2);
    }

    #[test]
    fn test_try_measure_failure_still_marks_end() {
        let (timer, _) = scripted(&[1.0, 5.0]);
        let result: Result<(), String> =
            timer.try_measure("start", "end", || Err("download failed".to_string()));
        assert_eq!(result, Err("download failed".to_string()));
        assert_eq!(
            timer.relative_time_points(),
            vec![TimePoint::new(0.0, "start"), TimePoint::new(4.0, "end")]
        );
    }

    #[test]
    fn test_report_is_consistent() {
        let (timer, _) = scripted(&[2.0, 3.5]);
        timer.mark("a");
        timer.mark("b");
        let report = timer.report();
        assert_eq!(report.time_source, TimeSourceKind::Monotonic);
        assert_eq!(report.initial_time_point, Some(2.0));
        assert_eq!(report.time_points, timer.relative_time_points());
        assert_eq!(report.durations, timer.durations());
        assert_eq!(report.total_elapsed, 1.5);
    }

    #[test]
    fn test_debug_output() {
        let (timer, _) = scripted(&[1.0]);
        timer.mark("a");
        let debug = format!("{timer:?}");
        assert!(debug.contains("ExecutionTimer"));
        assert!(debug.contains("marks: 1"));
    }

    #[test]
    fn test_default_timer_is_monotonic() {
        let timer = ExecutionTimer::default();
        timer.mark("a");
        timer.mark("b");
        assert_eq!(timer.time_source_kind(), TimeSourceKind::Monotonic);
        assert!(timer.durations()[0].seconds >= 0.0);
    }
}
