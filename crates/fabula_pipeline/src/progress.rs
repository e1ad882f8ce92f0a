//! Progress emission with per-invocation guarantees.

use fabula_core::ProgressEvent;
use fabula_interface::ProgressSink;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A channel whose sender can be passed to the orchestrator as a sink.
pub fn progress_channel() -> (
    UnboundedSender<ProgressEvent>,
    UnboundedReceiver<ProgressEvent>,
) {
    unbounded_channel()
}

/// Wraps a sink for one workflow invocation.
///
/// Percent never decreases, the terminal event is emitted at most once and
/// last, and nothing is emitted once the invocation is cancelled.
pub struct ProgressEmitter<'a> {
    sink: &'a dyn ProgressSink,
    cancel: &'a CancellationToken,
    percent: u8,
    finished: bool,
}

impl<'a> ProgressEmitter<'a> {
    /// Start an invocation's progress stream.
    pub fn new(sink: &'a dyn ProgressSink, cancel: &'a CancellationToken) -> Self {
        Self {
            sink,
            cancel,
            percent: 0,
            finished: false,
        }
    }

    fn silenced(&self) -> bool {
        self.finished || self.cancel.is_cancelled()
    }

    /// Emit a non-terminal step. Percent is raised to the last emitted value if lower.
    pub fn step(&mut self, label: &str, percent: u8, message: impl Into<String>) {
        if self.silenced() {
            return;
        }
        let percent = percent.clamp(self.percent, 99);
        self.percent = percent;
        let event = ProgressEvent::step(label, percent, message);
        debug!(label, percent, "Progress");
        self.sink.emit(event);
    }

    /// Emit the terminal event.
    pub fn complete(&mut self, label: &str, message: impl Into<String>) {
        if self.silenced() {
            return;
        }
        self.finished = true;
        self.percent = 100;
        self.sink.emit(ProgressEvent::complete(label, message));
    }

    /// Last emitted percent.
    pub fn percent(&self) -> u8 {
        self.percent
    }
}
