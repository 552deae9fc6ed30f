// Keyshortcut Bindings
// Registration input (Binding) and the registered form (ListenerRecord)

use std::fmt;

use crate::config::parse_combo_string;
use crate::{Modifier, Modifiers, ShortcutAction, ShortcutError};

/// Identifier returned by registration, used only to deregister later.
///
/// Ids are positive, strictly increasing and never reused by a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn new(value: u64) -> Self {
        ListenerId(value)
    }

    /// Get the raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single id deregisters like a one-element collection.
impl IntoIterator for ListenerId {
    type Item = ListenerId;
    type IntoIter = std::iter::Once<ListenerId>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}

/// A shortcut declaration: "when `key` is pressed with exactly `modifiers`,
/// run `action`".
///
/// Flags default to false and the label defaults to absent. A binding with
/// no action still matches, so it can stop propagation or show up in logs.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    pub key: String,
    pub action: Option<ShortcutAction>,
    pub modifiers: Modifiers,
    pub prevent_default: bool,
    pub stop_propagation: bool,
    pub log: bool,
    pub label: Option<String>,
}

impl Binding {
    /// Create a binding for `key` with no modifiers and no action
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Create a binding from a combo string like "Ctrl-Alt-p"
    pub fn parse(combo: &str) -> Result<Self, ShortcutError> {
        let parsed = parse_combo_string(combo)?;
        Ok(Self::new(parsed.key).with_modifiers(parsed.modifiers))
    }

    /// Set the action from a callable
    pub fn with_action<F>(self, callback: F) -> Self
    where
        F: Fn(&crate::KeyEvent) + Send + Sync + 'static,
    {
        self.with_shortcut_action(ShortcutAction::new(callback))
    }

    /// Set an already wrapped action
    pub fn with_shortcut_action(mut self, action: ShortcutAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Replace the full modifier signature
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Require one more modifier
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = self.modifiers.with(modifier);
        self
    }

    pub fn with_prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }

    pub fn with_stop_propagation(mut self) -> Self {
        self.stop_propagation = true;
        self
    }

    /// Turn on diagnostic logging for every keypress while this binding is registered
    pub fn with_log(mut self) -> Self {
        self.log = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A registered binding, filed under its key in the registry
#[derive(Debug, Clone)]
pub struct ListenerRecord {
    id: ListenerId,
    key: String,
    modifiers: Modifiers,
    action: Option<ShortcutAction>,
    prevent_default: bool,
    stop_propagation: bool,
    log: bool,
    label: Option<String>,
}

impl ListenerRecord {
    pub(crate) fn from_binding(id: ListenerId, binding: Binding) -> Self {
        Self {
            id,
            key: binding.key,
            modifiers: binding.modifiers,
            action: binding.action,
            prevent_default: binding.prevent_default,
            stop_propagation: binding.stop_propagation,
            log: binding.log,
            label: binding.label,
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn action(&self) -> Option<&ShortcutAction> {
        self.action.as_ref()
    }

    pub fn prevent_default(&self) -> bool {
        self.prevent_default
    }

    pub fn stop_propagation(&self) -> bool {
        self.stop_propagation
    }

    pub fn log(&self) -> bool {
        self.log
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Exact match on all four modifier flags
    pub fn matches(&self, modifiers: Modifiers) -> bool {
        self.modifiers == modifiers
    }
}
