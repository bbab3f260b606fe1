//! Scoped timing.
//!
//! [`MarkGuard`] marks the start of a scope when it is created and the end of
//! the scope when it is dropped, so the closing mark is recorded on every
//! exit path: normal return, early `?` return, or unwinding panic.

use tracing::debug;

use crate::timer::ExecutionTimer;

/// RAII guard that records the closing mark of a scope on drop.
///
/// # Example
///
/// ```rust
/// use execution_timer::ExecutionTimer;
///
/// let timer = ExecutionTimer::default();
/// {
///     let _scope = timer.scope("load start", "load end");
///     // ... work being measured ...
/// } // "load end" is marked here
/// assert_eq!(timer.len(), 2);
/// ```
#[must_use = "the closing mark is recorded when the guard is dropped"]
pub struct MarkGuard<'a> {
    timer: &'a ExecutionTimer,
    end_label: Option<String>,
}

impl<'a> MarkGuard<'a> {
    /// Mark `start_label` now and arm the guard to mark `end_label` on drop.
    pub fn new(
        timer: &'a ExecutionTimer,
        start_label: impl Into<String>,
        end_label: impl Into<String>,
    ) -> Self {
        timer.mark(start_label);
        Self {
            timer,
            end_label: Some(end_label.into()),
        }
    }

    /// Record the closing mark now instead of at the end of the enclosing scope.
    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for MarkGuard<'_> {
    fn drop(&mut self) {
        if let Some(label) = self.end_label.take() {
            if std::thread::panicking() {
                debug!(event = "Scope", phase = "Unwind", end_label = %label);
            }
            self.timer.mark(label);
        }
    }
}
