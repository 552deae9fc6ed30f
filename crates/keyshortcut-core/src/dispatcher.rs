// Keyshortcut Dispatcher
// Registration, modifier matching, firing order and the logging gate

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::config::ComboParseError;
use crate::output::{
    DiagnosticSink, LogEntry, LogSink, LABEL_SEPARATOR, LOG_STYLE, PLACEHOLDER_LABEL,
};
use crate::state::{Registry, Snapshot};
use crate::{Binding, KeyEvent, ListenerId, ListenerRecord};

/// Process-wide default dispatcher
static SHARED: LazyLock<Dispatcher> = LazyLock::new(Dispatcher::new);

/// Errors that can occur when registering shortcuts
#[derive(Debug, thiserror::Error)]
pub enum ShortcutError {
    #[error("shortcut binding has no key")]
    MissingKey,

    #[error("invalid binding string: {0}")]
    Parse(#[from] ComboParseError),
}

/// Dispatcher tuning, see `Settings::to_dispatcher_config` for the file form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Separator between labels of several fired records
    pub label_separator: String,
    /// Label for unnamed records and empty fired sets
    pub placeholder: String,
    /// Style directive attached to every log entry
    pub style: String,
    /// Skip auto-repeat keydowns entirely
    pub ignore_repeat: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            label_separator: LABEL_SEPARATOR.to_string(),
            placeholder: PLACEHOLDER_LABEL.to_string(),
            style: LOG_STYLE.to_string(),
            ignore_repeat: false,
        }
    }
}

/// Outcome of dispatching one keydown
#[derive(Debug, Clone)]
pub struct Dispatch {
    fired: Vec<Arc<ListenerRecord>>,
    default_prevented: bool,
    propagation_stopped: bool,
    log: Option<LogEntry>,
}

impl Dispatch {
    /// Records that matched, in firing order, up to and including a stopping record
    pub fn fired(&self) -> &[Arc<ListenerRecord>] {
        &self.fired
    }

    pub fn fired_ids(&self) -> Vec<ListenerId> {
        self.fired.iter().map(|record| record.id()).collect()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// The diagnostic entry emitted for this keypress, if the gate was on
    pub fn log(&self) -> Option<&LogEntry> {
        self.log.as_ref()
    }
}

/// Keyboard shortcut dispatcher.
///
/// Owns the registry and receives every key event from the host through
/// [`Dispatcher::handle_event`]. Dispatch runs synchronously on the calling
/// thread. The registry lock is released before any action runs, so actions
/// may register or deregister shortcuts; those changes apply from the next
/// keypress. A panicking action is not caught.
pub struct Dispatcher {
    registry: RwLock<Registry>,
    next_id: AtomicU64,
    closed: AtomicBool,
    sink: Arc<dyn DiagnosticSink>,
    config: DispatcherConfig,
}

impl Dispatcher {
    /// Create a dispatcher with default config, logging through the `log` facade
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            next_id: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            sink: Arc::new(LogSink),
            config,
        }
    }

    /// Replace the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The process-wide default dispatcher
    pub fn shared() -> &'static Dispatcher {
        &SHARED
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Register a binding and return its id.
    ///
    /// The record is placed in front of all earlier records for the same key.
    pub fn register(&self, binding: Binding) -> Result<ListenerId, ShortcutError> {
        if binding.key.is_empty() {
            return Err(ShortcutError::MissingKey);
        }

        let mut registry = self.registry.write();
        let id = ListenerId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let record = registry.insert(ListenerRecord::from_binding(id, binding));
        log::debug!(
            "registered shortcut {} for {:?} [{}]",
            id,
            record.key(),
            record.modifiers().signature()
        );
        Ok(id)
    }

    /// Remove the records with the given ids.
    ///
    /// Accepts a single id or any collection of ids. Unknown or already
    /// removed ids are ignored. Returns the number of records removed.
    pub fn deregister(&self, ids: impl IntoIterator<Item = ListenerId>) -> usize {
        let ids: Vec<ListenerId> = ids.into_iter().collect();
        let removed = self.registry.write().remove(&ids);
        log::debug!("deregistered {} of {} shortcut id(s)", removed, ids.len());
        removed
    }

    /// Total number of registrations ever made
    pub fn count(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    /// Number of currently registered records
    pub fn active_count(&self) -> usize {
        self.registry.read().len()
    }

    /// Copy of the current registry
    pub fn snapshot(&self) -> Snapshot {
        self.registry.read().snapshot()
    }

    /// True iff any registered record has logging turned on
    pub fn logging_enabled(&self) -> bool {
        self.registry.read().logging_enabled()
    }

    /// Stop receiving events. Registrations are kept but never fire again.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            log::debug!("dispatcher closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Intake for host key events.
    ///
    /// Returns `None` for events that are not dispatched: key releases,
    /// repeats when `ignore_repeat` is set, and everything after `close`.
    pub fn handle_event(&self, event: &mut KeyEvent) -> Option<Dispatch> {
        if self.is_closed() || !event.kind().is_keydown() {
            return None;
        }
        if self.config.ignore_repeat && event.kind().is_repeat() {
            return None;
        }
        Some(self.dispatch(event))
    }

    fn dispatch(&self, event: &mut KeyEvent) -> Dispatch {
        let bucket = self.registry.read().bucket(event.key()).to_vec();
        let signature = event.modifiers();

        let mut fired = Vec::new();
        for record in bucket {
            if !record.matches(signature) {
                continue;
            }
            if let Some(action) = record.action() {
                action.call(event);
            }
            if record.prevent_default() {
                event.prevent_default();
            }
            let stop = record.stop_propagation();
            fired.push(record);
            if stop {
                event.stop_propagation();
                break;
            }
        }

        log::trace!("{} fired {} shortcut(s)", event, fired.len());

        let log = if !event.is_modifier_key() && self.logging_enabled() {
            let entry = LogEntry::new(
                event,
                &fired,
                &self.config.label_separator,
                &self.config.placeholder,
                &self.config.style,
            );
            self.sink.emit(&entry);
            Some(entry)
        } else {
            None
        };

        Dispatch {
            fired,
            default_prevented: event.default_prevented(),
            propagation_stopped: event.propagation_stopped(),
            log,
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &*self.registry.read())
            .field("count", &self.count())
            .field("closed", &self.is_closed())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
