// Keyshortcut Key Events
// The key event delivered by the host and consumed by the dispatcher

use std::fmt;

use crate::modifier::{is_modifier_key, Modifier, Modifiers};

/// Represents the action state of a key event.
///
/// Press and Repeat are both keydowns: hosts deliver auto-repeat as
/// further keydown events for the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

impl KeyEventKind {
    /// Returns true if the kind is either Press or Repeat
    pub fn is_keydown(self) -> bool {
        matches!(self, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Returns true if this is a Repeat event
    pub fn is_repeat(self) -> bool {
        matches!(self, KeyEventKind::Repeat)
    }
}

impl fmt::Display for KeyEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEventKind::Press => write!(f, "press"),
            KeyEventKind::Repeat => write!(f, "repeat"),
            KeyEventKind::Release => write!(f, "release"),
        }
    }
}

/// A key event as seen by shortcut actions.
///
/// `key` is the physical key value assigned by the host ("p", "Escape",
/// "Control"). The dispatcher records default suppression and propagation
/// stops on the event itself so the host can honor them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    key: String,
    modifiers: Modifiers,
    kind: KeyEventKind,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyEvent {
    /// Create a keydown event for `key` with the given modifiers
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            kind: KeyEventKind::Press,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create a keydown event with no modifiers held
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Create a keydown event for a modifier pressed on its own
    pub fn modifier_down(modifier: Modifier) -> Self {
        Self::new(modifier.key_name(), Modifiers::NONE.with(modifier))
    }

    /// Set the event kind
    pub fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// The physical key value
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The modifier signature carried by the event
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn kind(&self) -> KeyEventKind {
        self.kind
    }

    /// True when the key is a bare modifier (Control, Meta, Alt, Shift)
    pub fn is_modifier_key(&self) -> bool {
        is_modifier_key(&self.key)
    }

    /// Suppress the host's default handling of this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop the host from propagating this event further
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}-{}", self.modifiers, self.key)
        }
    }
}
