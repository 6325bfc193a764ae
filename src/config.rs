//! Session configuration supplied by the embedding application
//!
//! Every field is optional on the wire; missing values resolve to defaults
//! and never fail.

use crate::locale::{locale_strings, Locale};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides the configured locale
pub const LOCALE_ENV_VAR: &str = "CONTENTA_CHAT_LOCALE";

pub const DEFAULT_MAX_LENGTH: usize = 500;
pub const DEFAULT_GREETING_DELAY_MS: u64 = 2500;
pub const DEFAULT_TYPEWRITER_SPEED_MS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Delayed welcome message shown on mount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
    pub enabled: bool,
    pub delay_ms: u64,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_ms: DEFAULT_GREETING_DELAY_MS,
        }
    }
}

impl GreetingConfig {
    /// Delay before the welcome message, or `None` when disabled
    #[must_use]
    pub fn delay(&self) -> Option<Duration> {
        self.enabled.then(|| Duration::from_millis(self.delay_ms))
    }
}

/// Character-by-character reveal of assistant replies (rendering hint only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub enabled: bool,
    pub speed_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            speed_ms: DEFAULT_TYPEWRITER_SPEED_MS,
        }
    }
}

/// Full chat configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)] // Mirrors the widget's display toggles
pub struct ChatConfig {
    /// Locale tag such as `pt-BR`; unknown tags use the default locale
    pub locale: Option<String>,
    pub placeholder: Option<String>,
    /// Maximum characters per submission, 0 disables the limit
    pub max_length: usize,
    pub allow_multiline: bool,
    pub show_timestamps: bool,
    pub show_avatars: bool,
    pub auto_focus: bool,
    pub disabled: bool,
    pub assistant_name: Option<String>,
    pub welcome_message: Option<String>,
    pub error_message: Option<String>,
    /// Label shown next to the typing indicator; defaults to the assistant name
    pub typing_label: Option<String>,
    pub greeting: GreetingConfig,
    pub typewriter: TypewriterConfig,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            locale: None,
            placeholder: None,
            max_length: DEFAULT_MAX_LENGTH,
            allow_multiline: true,
            show_timestamps: true,
            show_avatars: false,
            auto_focus: false,
            disabled: false,
            assistant_name: None,
            welcome_message: None,
            error_message: None,
            typing_label: None,
            greeting: GreetingConfig::default(),
            typewriter: TypewriterConfig::default(),
        }
    }
}

/// Display options handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayOptions {
    pub placeholder: String,
    pub max_length: usize,
    pub allow_multiline: bool,
    pub show_timestamps: bool,
    pub show_avatars: bool,
    pub auto_focus: bool,
    pub disabled: bool,
    pub typewriter: TypewriterConfig,
}

/// Locale strings with per-session overrides applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStrings {
    pub assistant_name: String,
    pub welcome_message: String,
    pub placeholder: String,
    pub error_message: String,
    pub typing_label: String,
}

impl ChatConfig {
    /// Parse a JSON config document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] when the document is not valid JSON
    /// or a field has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_locale_override(std::env::var(LOCALE_ENV_VAR).ok())
    }

    fn with_locale_override(mut self, locale: Option<String>) -> Self {
        if let Some(tag) = locale.filter(|t| !t.trim().is_empty()) {
            self.locale = Some(tag);
        }
        self
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .map_or(Locale::default(), Locale::from_tag)
    }

    #[must_use]
    pub fn strings(&self) -> ResolvedStrings {
        let base = locale_strings(self.locale.as_deref());
        let assistant_name = self
            .assistant_name
            .clone()
            .unwrap_or_else(|| base.assistant_name.to_string());
        ResolvedStrings {
            typing_label: self
                .typing_label
                .clone()
                .unwrap_or_else(|| assistant_name.clone()),
            assistant_name,
            welcome_message: self
                .welcome_message
                .clone()
                .unwrap_or_else(|| base.welcome_message.to_string()),
            placeholder: self
                .placeholder
                .clone()
                .unwrap_or_else(|| base.placeholder.to_string()),
            error_message: self
                .error_message
                .clone()
                .unwrap_or_else(|| base.error_message.to_string()),
        }
    }

    #[must_use]
    pub fn display(&self) -> DisplayOptions {
        DisplayOptions {
            placeholder: self.strings().placeholder,
            max_length: self.max_length,
            allow_multiline: self.allow_multiline,
            show_timestamps: self.show_timestamps,
            show_avatars: self.show_avatars,
            auto_focus: self.auto_focus,
            disabled: self.disabled,
            typewriter: self.typewriter.clone(),
        }
    }
}
