// Keyshortcut Core Library
// Keyboard shortcut registry and dispatch

pub mod action;
pub mod binding;
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod key;
pub mod modifier;
pub mod output;
pub mod shortcut;
pub mod state;

#[cfg(feature = "settings")]
pub mod settings;

pub use action::ShortcutAction;
pub use binding::{Binding, ListenerId, ListenerRecord};
pub use config::{parse_combo_string, ComboParseError, ParsedCombo};
pub use dispatcher::{Dispatch, Dispatcher, DispatcherConfig, ShortcutError};
pub use event::{EventPump, EventSource, IterSource, PumpStats};
pub use key::{KeyEvent, KeyEventKind};
pub use modifier::{is_modifier_key, Modifier, Modifiers};
pub use output::{DiagnosticSink, LogEntry, LogSink, MemorySink};
pub use shortcut::KeyShortcut;
pub use state::{Registry, Snapshot};

#[cfg(feature = "settings")]
pub use settings::{Settings, SettingsError};
