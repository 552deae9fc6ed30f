// Keyshortcut Config API - Combo String Parser
// Parses combo strings like "Ctrl-Shift-p" into a modifier signature and a key value

use crate::{Modifier, Modifiers};

/// Result of parsing a combo string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCombo {
    /// The modifiers parsed from the string
    pub modifiers: Modifiers,
    /// The key value (the last component after hyphens), kept verbatim
    pub key: String,
}

/// Errors that can occur during combo parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboParseError {
    /// Empty input string
    EmptyInput,
    /// Modifier alias not recognized
    UnknownModifier(String),
    /// Input ends with a single hyphen (e.g., "Ctrl-")
    TrailingHyphen,
}

impl std::fmt::Display for ComboParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComboParseError::EmptyInput => write!(f, "combo string cannot be empty"),
            ComboParseError::UnknownModifier(name) => write!(f, "unknown modifier: '{}'", name),
            ComboParseError::TrailingHyphen => write!(f, "combo string cannot end with hyphen"),
        }
    }
}

impl std::error::Error for ComboParseError {}

/// Parse a combo string like "Ctrl-Shift-p" into modifiers and key
///
/// Modifier aliases are case-sensitive. The key is taken as written, since
/// hosts report "p" and "P" as different key values. A hyphen key is
/// written as a doubled trailing hyphen ("Ctrl--").
///
/// # Examples
/// ```
/// use keyshortcut_core::config::parse_combo_string;
/// let parsed = parse_combo_string("Ctrl-Alt-p").unwrap();
/// assert!(parsed.modifiers.ctrl && parsed.modifiers.alt);
/// assert_eq!(parsed.key, "p");
/// ```
pub fn parse_combo_string(exp: &str) -> Result<ParsedCombo, ComboParseError> {
    let trimmed = exp.trim();
    if trimmed.is_empty() {
        return Err(ComboParseError::EmptyInput);
    }

    let (prefix, key) = if trimmed == "-" {
        ("", "-")
    } else if let Some(rest) = trimmed.strip_suffix("--") {
        (rest, "-")
    } else if trimmed.ends_with('-') {
        return Err(ComboParseError::TrailingHyphen);
    } else {
        trimmed.rsplit_once('-').unwrap_or(("", trimmed))
    };

    let mut modifiers = Modifiers::NONE;
    if !prefix.is_empty() {
        for modifier_str in prefix.split('-') {
            let modifier = Modifier::from_alias(modifier_str)
                .ok_or_else(|| ComboParseError::UnknownModifier(modifier_str.to_string()))?;
            // duplicates collapse into the same flag
            modifiers.set(modifier, true);
        }
    }

    Ok(ParsedCombo {
        modifiers,
        key: key.to_string(),
    })
}
