//! Progress consumers.

use fabula_core::ProgressEvent;

/// Receives the ordered progress stream of a workflow invocation.
///
/// Fire-and-forget: emitting never fails and never blocks the workflow.
pub trait ProgressSink: Send + Sync {
    /// Deliver one event.
    fn emit(&self, event: ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: ProgressEvent) {}
}

impl ProgressSink for tokio::sync::mpsc::UnboundedSender<ProgressEvent> {
    fn emit(&self, event: ProgressEvent) {
        // A dropped receiver just means nobody is listening any more
        let _ = self.send(event);
    }
}
