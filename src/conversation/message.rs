//! Conversation data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and creation time for a message that is about to be created
///
/// Minted outside the transition function so transitions stay pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStamp {
    pub id: String,
    pub at: DateTime<Utc>,
}

impl MessageStamp {
    #[must_use]
    pub fn new(id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self { id: id.into(), at }
    }

    /// Fresh stamp with a `<role>-<uuid>` id
    #[must_use]
    pub fn mint(role: Role) -> Self {
        Self::with_prefix(role.as_str())
    }

    /// Fresh stamp for a welcome message
    #[must_use]
    pub fn welcome() -> Self {
        Self::with_prefix("assistant-welcome")
    }

    fn with_prefix(prefix: &str) -> Self {
        Self {
            id: format!("{prefix}-{}", uuid::Uuid::new_v4()),
            at: Utc::now(),
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    #[must_use]
    pub fn new(stamp: MessageStamp, sender: Role, content: impl Into<String>) -> Self {
        Self {
            id: stamp.id,
            content: content.into(),
            sender,
            display_name: None,
            timestamp: stamp.at,
        }
    }

    #[must_use]
    pub fn user(stamp: MessageStamp, content: impl Into<String>) -> Self {
        Self::new(stamp, Role::User, content)
    }

    #[must_use]
    pub fn assistant(
        stamp: MessageStamp,
        display_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            display_name: Some(display_name.into()),
            ..Self::new(stamp, Role::Assistant, content)
        }
    }

    #[must_use]
    pub fn system(stamp: MessageStamp, content: impl Into<String>) -> Self {
        Self::new(stamp, Role::System, content)
    }
}

/// Transient "participant is composing" signal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypingIndicator {
    pub participant_id: String,
    pub display_name: String,
}

/// Participant id used for the assistant's typing indicator
pub const ASSISTANT_PARTICIPANT_ID: &str = "assistant";

impl TypingIndicator {
    #[must_use]
    pub fn assistant(display_name: impl Into<String>) -> Self {
        Self {
            participant_id: ASSISTANT_PARTICIPANT_ID.to_string(),
            display_name: display_name.into(),
        }
    }
}
