// Keyshortcut Output Layer
// Diagnostic labels, log entries and sinks

mod label;
mod sink;

pub use label::{
    combined_label, display_label, LogEntry, LABEL_SEPARATOR, LOG_STYLE, PLACEHOLDER_LABEL,
};
pub use sink::{DiagnosticSink, LogSink, MemorySink, LOG_TARGET};
