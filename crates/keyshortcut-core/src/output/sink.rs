// Keyshortcut Diagnostic Sinks
// Where log entries go once the logging gate lets them through

use parking_lot::Mutex;

use super::LogEntry;

/// Log target used by [`LogSink`]
pub const LOG_TARGET: &str = "keyshortcut";

/// Receives one entry per logged keypress.
///
/// Emission is best-effort: sinks have no way to report failure.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, entry: &LogEntry);
}

/// Default sink, writes entries through the `log` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, entry: &LogEntry) {
        log::info!(target: LOG_TARGET, "{}", entry);
    }
}

/// Sink that keeps every entry in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all entries emitted so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Labels of all entries emitted so far
    pub fn labels(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, entry: &LogEntry) {
        self.entries.lock().push(entry.clone());
    }
}
