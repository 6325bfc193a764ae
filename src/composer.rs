//! Input normalization applied before a submission reaches the turn controller

use crate::config::ChatConfig;

/// Applies the character limit and multiline setting to raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composer {
    max_length: usize,
    allow_multiline: bool,
}

impl Composer {
    #[must_use]
    pub fn new(max_length: usize, allow_multiline: bool) -> Self {
        Self {
            max_length,
            allow_multiline,
        }
    }

    #[must_use]
    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.max_length, config.allow_multiline)
    }

    /// Normalize raw input.
    ///
    /// Line breaks collapse to single spaces in single-line mode, then the
    /// text is cut to `max_length` characters. Blank input passes through
    /// unchanged; rejecting it is the state machine's job.
    #[must_use]
    pub fn prepare(&self, raw: &str) -> String {
        let text = if self.allow_multiline {
            raw.to_string()
        } else {
            raw.replace("\r\n", " ").replace(['\n', '\r'], " ")
        };

        if self.max_length == 0 {
            return text;
        }
        match text.char_indices().nth(self.max_length) {
            Some((cut, _)) => {
                tracing::debug!(limit = self.max_length, "Truncating input to character limit");
                text.get(..cut).unwrap_or(&text).to_string()
            }
            None => text,
        }
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::from_config(&ChatConfig::default())
    }
}
