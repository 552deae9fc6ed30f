// Keyshortcut Diagnostic Labels
// Label resolution and the single log entry emitted per keypress

use std::fmt;
use std::sync::Arc;

use crate::{KeyEvent, ListenerRecord};

/// Label used for a record with neither label nor action name, and for an empty fired set
pub const PLACEHOLDER_LABEL: &str = "KEY";

/// Separator between labels when several records fired
pub const LABEL_SEPARATOR: &str = "  ";

/// Style directive carried with every entry
pub const LOG_STYLE: &str = "color: white; background-color: black; padding: 2px 4px;";

/// Label for one fired record: explicit label, then action name
pub fn display_label(record: &ListenerRecord) -> Option<&str> {
    record
        .label()
        .filter(|label| !label.is_empty())
        .or_else(|| record.action().and_then(|a| a.name()).filter(|n| !n.is_empty()))
}

/// Join the labels of all fired records into one label
pub fn combined_label(
    fired: &[Arc<ListenerRecord>],
    separator: &str,
    placeholder: &str,
) -> String {
    if fired.is_empty() {
        return placeholder.to_string();
    }
    fired
        .iter()
        .map(|record| display_label(record).unwrap_or(placeholder))
        .collect::<Vec<_>>()
        .join(separator)
}

/// One diagnostic line describing a keypress and what fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub label: String,
    pub style: String,
    pub modifiers: String,
    pub key: String,
}

impl LogEntry {
    /// Build the entry for `event` and the records that fired on it
    pub fn new(
        event: &KeyEvent,
        fired: &[Arc<ListenerRecord>],
        separator: &str,
        placeholder: &str,
        style: &str,
    ) -> Self {
        Self {
            label: combined_label(fired, separator, placeholder),
            style: style.to_string(),
            modifiers: event.modifiers().signature(),
            key: event.key().to_string(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.label, self.style)?;
        if !self.modifiers.is_empty() {
            write!(f, " {}", self.modifiers)?;
        }
        write!(f, " {}", self.key)
    }
}
