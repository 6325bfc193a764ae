//! Sender error types

use thiserror::Error;

/// Failure reported by (or on behalf of) a sender adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SendError {
    pub kind: SendErrorKind,
    pub message: String,
}

impl SendError {
    #[must_use]
    pub fn new(kind: SendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The adapter returned an error or its awaitable rejected
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(SendErrorKind::Failed, message)
    }

    /// The adapter answered with `success: false`
    #[must_use]
    pub fn unsuccessful(response: impl Into<String>) -> Self {
        Self::new(SendErrorKind::Unsuccessful, response)
    }

    /// A streamed response raised an error mid-iteration
    #[must_use]
    pub fn interrupted(message: impl Into<String>) -> Self {
        Self::new(SendErrorKind::Interrupted, message)
    }

    /// The adapter panicked
    #[must_use]
    pub fn panicked(message: impl Into<String>) -> Self {
        Self::new(SendErrorKind::Panicked, message)
    }
}

/// Classification of adapter failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendErrorKind {
    Failed,
    Unsuccessful,
    Interrupted,
    Panicked,
}

impl SendErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Failed => "failed",
            Self::Unsuccessful => "unsuccessful",
            Self::Interrupted => "interrupted",
            Self::Panicked => "panicked",
        }
    }
}
