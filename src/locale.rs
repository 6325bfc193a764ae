//! Built-in display strings per locale
//!
//! Unknown or missing locale tags fail closed to [`DEFAULT_LOCALE`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "pt-BR")]
    PtBr,
}

pub const DEFAULT_LOCALE: Locale = Locale::EnUs;

/// The four strings every locale provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleStrings {
    pub assistant_name: &'static str,
    pub welcome_message: &'static str,
    pub placeholder: &'static str,
    pub error_message: &'static str,
}

const EN_US: LocaleStrings = LocaleStrings {
    assistant_name: "Assistant",
    welcome_message: "How can I help you today?",
    placeholder: "Type your message...",
    error_message: "Sorry, an error occurred while processing your message.",
};

const PT_BR: LocaleStrings = LocaleStrings {
    assistant_name: "Assistente",
    welcome_message: "Como posso ajudá-lo hoje?",
    placeholder: "Digite sua mensagem...",
    error_message: "Desculpe, ocorreu um erro ao processar sua mensagem.",
};

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::EnUs, Locale::PtBr];

    /// Canonical BCP 47 tag
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::PtBr => "pt-BR",
        }
    }

    #[must_use]
    pub fn strings(self) -> &'static LocaleStrings {
        match self {
            Locale::EnUs => &EN_US,
            Locale::PtBr => &PT_BR,
        }
    }

    /// Parse a locale tag, returning `None` for anything unrecognized.
    ///
    /// Matching ignores case and accepts `_` as separator, so `pt_br`,
    /// `PT-BR` and the bare language `pt` all resolve to [`Locale::PtBr`].
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "en-us" | "en" => Some(Locale::EnUs),
            "pt-br" | "pt" => Some(Locale::PtBr),
            _ => None,
        }
    }

    /// Like [`Locale::parse`] but falls back to the default locale.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|| {
            tracing::debug!(tag = %tag, fallback = DEFAULT_LOCALE.tag(), "Unknown locale, using default");
            DEFAULT_LOCALE
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Locale strings for an optional tag, falling back to the default locale
#[must_use]
pub fn locale_strings(tag: Option<&str>) -> &'static LocaleStrings {
    tag.map_or(DEFAULT_LOCALE, Locale::from_tag).strings()
}
