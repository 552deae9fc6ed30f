// Keyshortcut Modifier System
// Represents the four shortcut modifiers (Alt, Ctrl, Shift, Meta) and their signatures

use std::fmt;

use smallvec::SmallVec;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

/// Aliases accepted in binding strings, first entry is the primary alias
const MODIFIER_ALIASES: &[(Modifier, &[&str])] = &[
    (Modifier::Alt, &["Alt", "A", "Opt", "Option"]),
    (Modifier::Ctrl, &["Ctrl", "C", "Control"]),
    (Modifier::Shift, &["Shift", "S"]),
    (Modifier::Meta, &["Meta", "M", "Super", "Win", "Cmd", "Command"]),
];

/// Key values the host reports when a modifier is pressed on its own.
///
/// These never produce a diagnostic line: holding a modifier before the
/// real key would otherwise log twice for one shortcut.
const MODIFIER_KEY_NAMES: &[&str] = &["Control", "Meta", "Alt", "Shift"];

/// A single keyboard modifier.
///
/// Variant order is the order used for modifier signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Modifier {
    Alt,
    Ctrl,
    Shift,
    Meta,
}

impl Modifier {
    /// Get modifier by alias (case-sensitive)
    pub fn from_alias(alias: &str) -> Option<Modifier> {
        MODIFIER_ALIASES
            .iter()
            .find(|(_, aliases)| aliases.contains(&alias))
            .map(|(modifier, _)| *modifier)
    }

    /// Get the first alias (string representation)
    pub fn primary_alias(self) -> &'static str {
        MODIFIER_ALIASES
            .iter()
            .find(|(modifier, _)| *modifier == self)
            .and_then(|(_, aliases)| aliases.first().copied())
            .unwrap_or("")
    }

    /// Key value the host assigns to this modifier when pressed alone
    pub fn key_name(self) -> &'static str {
        match self {
            Modifier::Alt => "Alt",
            Modifier::Ctrl => "Control",
            Modifier::Shift => "Shift",
            Modifier::Meta => "Meta",
        }
    }

    /// Name used in modifier signatures ("alt", "ctrl", "shift", "meta")
    pub fn signature_name(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary_alias())
    }
}

/// Check if a key value is a bare modifier key (Control, Meta, Alt, Shift)
pub fn is_modifier_key(key: &str) -> bool {
    MODIFIER_KEY_NAMES.contains(&key)
}

/// The four modifier flags carried by a key event or declared by a binding.
///
/// Equality is exact over all four flags: a binding for `alt` does not
/// match an event carrying `alt` and `shift`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        ctrl: false,
        shift: false,
        meta: false,
    };

    /// Create an empty modifier set
    pub fn new() -> Self {
        Self::NONE
    }

    /// Return a copy with the given modifier set
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.set(modifier, true);
        self
    }

    /// Set or clear a modifier flag
    pub fn set(&mut self, modifier: Modifier, value: bool) {
        match modifier {
            Modifier::Alt => self.alt = value,
            Modifier::Ctrl => self.ctrl = value,
            Modifier::Shift => self.shift = value,
            Modifier::Meta => self.meta = value,
        }
    }

    /// Check whether a modifier flag is set
    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Alt => self.alt,
            Modifier::Ctrl => self.ctrl,
            Modifier::Shift => self.shift,
            Modifier::Meta => self.meta,
        }
    }

    /// True when no flag is set
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Active modifiers in signature order
    pub fn active(&self) -> SmallVec<[Modifier; 4]> {
        Modifier::iter().filter(|m| self.contains(*m)).collect()
    }

    /// Space-joined names of the active modifiers, e.g. `"alt ctrl"`
    pub fn signature(&self) -> String {
        self.active()
            .iter()
            .map(|m| m.signature_name())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter().fold(Modifiers::NONE, Modifiers::with)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.active().iter().map(|m| m.primary_alias()).collect();
        write!(f, "{}", parts.join("-"))
    }
}
