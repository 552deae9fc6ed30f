// Keyshortcut Settings Module
// User-configurable dispatcher settings loaded from TOML

#![cfg(feature = "settings")]

use std::path::{Path, PathBuf};

use crate::output::{LABEL_SEPARATOR, LOG_STYLE, PLACEHOLDER_LABEL};
use crate::DispatcherConfig;

/// Settings for the dispatcher's diagnostics and intake
///
/// These settings are loaded from a TOML file (default: ~/.config/keyshortcut/settings.toml).
/// The defaults reproduce the built-in dispatcher behavior.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Separator between labels when several shortcuts fire
    label_separator: String,

    /// Label used when nothing named fired
    placeholder: String,

    /// Style directive attached to log entries
    style: String,

    /// Skip auto-repeat keydowns
    ignore_repeat: bool,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
struct SettingsToml {
    #[serde(default)]
    logging: Option<LoggingSettings>,

    #[serde(default)]
    dispatch: Option<DispatchSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct LoggingSettings {
    #[serde(default)]
    label_separator: Option<String>,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    style: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct DispatchSettings {
    #[serde(default)]
    ignore_repeat: Option<toml::Value>,
}

impl Settings {
    /// Create settings with built-in defaults
    pub fn new() -> Self {
        Self {
            label_separator: LABEL_SEPARATOR.to_string(),
            placeholder: PLACEHOLDER_LABEL.to_string(),
            style: LOG_STYLE.to_string(),
            ignore_repeat: false,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(logging) = toml_settings.logging {
            if let Some(separator) = logging.label_separator {
                settings.label_separator = separator;
            }
            if let Some(placeholder) = logging.placeholder {
                if placeholder.is_empty() {
                    return Err(SettingsError::InvalidValue(
                        "logging.placeholder cannot be empty".to_string(),
                    ));
                }
                settings.placeholder = placeholder;
            }
            if let Some(style) = logging.style {
                settings.style = style;
            }
        }

        if let Some(dispatch) = toml_settings.dispatch {
            if let Some(value) = dispatch.ignore_repeat {
                settings.ignore_repeat = parse_bool_value(&value)?;
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keyshortcut").join("settings.toml"))
    }

    /// Load from default location (~/.config/keyshortcut/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    pub fn label_separator(&self) -> &str {
        &self.label_separator
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn ignore_repeat(&self) -> bool {
        self.ignore_repeat
    }

    /// Path the settings were loaded from, if any
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Reload settings from the file they were loaded from
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    /// Dispatcher config built from these settings
    pub fn to_dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            label_separator: self.label_separator.clone(),
            placeholder: self.placeholder.clone(),
            style: self.style.clone(),
            ignore_repeat: self.ignore_repeat,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a TOML value as a boolean
fn parse_bool_value(value: &toml::Value) -> Result<bool, SettingsError> {
    match value {
        toml::Value::Boolean(b) => Ok(*b),
        toml::Value::Integer(1) => Ok(true),
        toml::Value::Integer(0) => Ok(false),
        toml::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(SettingsError::InvalidValue(format!(
                "Cannot convert '{}' to boolean",
                s
            ))),
        },
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to boolean",
            value
        ))),
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Keyshortcut Settings
# Place this file at: ~/.config/keyshortcut/settings.toml

[logging]
# Separator between labels when several shortcuts fire on one keypress
label_separator = "  "
# Label shown when the fired shortcuts have no label or name
placeholder = "KEY"
# Style directive attached to every log line
style = "color: white; background-color: black; padding: 2px 4px;"

[dispatch]
# Skip auto-repeat keydowns while a key is held
ignore_repeat = false
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::new();
        assert_eq!(settings.label_separator(), "  ");
        assert_eq!(settings.placeholder(), "KEY");
        assert!(!settings.ignore_repeat());
        assert_eq!(settings.to_dispatcher_config(), DispatcherConfig::default());
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let settings = Settings::from_toml(default_settings_content()).unwrap();
        assert_eq!(settings.to_dispatcher_config(), DispatcherConfig::default());
    }

    #[test]
    fn test_settings_from_toml() {
        let toml = r#"
[logging]
label_separator = " | "
placeholder = "?"

[dispatch]
ignore_repeat = true
"#;

        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.label_separator(), " | ");
        assert_eq!(settings.placeholder(), "?");
        assert_eq!(settings.style(), LOG_STYLE);
        assert!(settings.ignore_repeat());
    }

    #[test]
    fn test_settings_with_string_bool() {
        let toml = r#"
[dispatch]
ignore_repeat = "yes"
"#;
        assert!(Settings::from_toml(toml).unwrap().ignore_repeat());

        let bad = r#"
[dispatch]
ignore_repeat = "sometimes"
"#;
        assert!(matches!(
            Settings::from_toml(bad),
            Err(SettingsError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_empty_placeholder_rejected() {
        let toml = r#"
[logging]
placeholder = ""
"#;
        assert!(matches!(
            Settings::from_toml(toml),
            Err(SettingsError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Settings::from_toml("[logging"),
            Err(SettingsError::TomlParse(_))
        ));
    }

    #[test]
    fn test_reload_without_source() {
        let mut settings = Settings::new();
        assert!(settings.source_path().is_none());
        assert!(settings.reload().is_err());
    }
}
