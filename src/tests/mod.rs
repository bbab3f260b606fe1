
use std::sync::Arc;

use crate::{ExecutionTimer, SequenceSource, TimeSourceKind};

/// A timer fed from a scripted source, plus a handle to that source.
pub(crate) fn scripted_timer(
    readings: impl IntoIterator<Item = f64>,
) -> (ExecutionTimer, Arc<SequenceSource>) {
    let source = Arc::new(SequenceSource::new(readings));
    let timer = ExecutionTimer::with_source(TimeSourceKind::Monotonic, source.clone());
    (timer, source)
}
