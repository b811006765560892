//! Diagnostic sinks for non-fatal resolution warnings

use parking_lot::Mutex;

/// Receiver of non-fatal warnings raised while resolving annotations
pub trait DiagnosticSink: Send + Sync {
    /// Report a warning
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing` under the `metareflect::resolve` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "metareflect::resolve", "{}", message);
    }
}

/// Discards every warning
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&self, _message: &str) {}
}

/// Keeps warnings in memory for later inspection
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded warnings, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Number of recorded warnings
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Drop all recorded warnings
    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn warn(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
