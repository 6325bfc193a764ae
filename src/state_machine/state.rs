//! Turn state types

use crate::config::ChatConfig;
use crate::conversation::TypingIndicator;
use crate::sender::SendError;
use std::fmt;
use std::time::Duration;

/// Sequence number of a user-submission-to-completion cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TurnId(pub u64);

impl TurnId {
    #[must_use]
    pub fn next(self) -> Self {
        TurnId(self.0 + 1)
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Turn controller state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TurnState {
    /// Ready for user input
    #[default]
    Idle,

    /// User message committed, turn about to begin
    UserCommitted { turn: TurnId, text: String },

    /// Sender invoked, nothing received yet
    AwaitingResponse { turn: TurnId, reply_id: String },

    /// At least one fragment received
    Streaming {
        turn: TurnId,
        reply_id: String,
        /// Concatenation of every fragment so far
        content: String,
    },

    /// Reply finished, cleanup pending
    Completed { turn: TurnId, reply: String },

    /// Sender failed, cleanup pending
    ErrorRecovery { turn: TurnId, error: SendError },
}

impl TurnState {
    /// Turn in flight, if any
    #[must_use]
    pub fn turn(&self) -> Option<TurnId> {
        match self {
            TurnState::Idle => None,
            TurnState::UserCommitted { turn, .. }
            | TurnState::AwaitingResponse { turn, .. }
            | TurnState::Streaming { turn, .. }
            | TurnState::Completed { turn, .. }
            | TurnState::ErrorRecovery { turn, .. } => Some(*turn),
        }
    }

    /// Whether a turn is in flight (submissions are dropped)
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !matches!(self, TurnState::Idle)
    }

    /// Short name for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TurnState::Idle => "idle",
            TurnState::UserCommitted { .. } => "user_committed",
            TurnState::AwaitingResponse { .. } => "awaiting_response",
            TurnState::Streaming { .. } => "streaming",
            TurnState::Completed { .. } => "completed",
            TurnState::ErrorRecovery { .. } => "error_recovery",
        }
    }
}

/// Immutable per-session settings consulted by transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnContext {
    pub assistant_name: String,
    pub typing_label: String,
    pub welcome_message: String,
    pub error_message: String,
    /// Delay before the welcome message; `None` disables the greeting
    pub greeting_delay: Option<Duration>,
}

impl TurnContext {
    #[must_use]
    pub fn from_config(config: &ChatConfig) -> Self {
        let strings = config.strings();
        Self {
            assistant_name: strings.assistant_name,
            typing_label: strings.typing_label,
            welcome_message: strings.welcome_message,
            error_message: strings.error_message,
            greeting_delay: config.greeting.delay(),
        }
    }

    #[must_use]
    pub fn assistant_typing(&self) -> Vec<TypingIndicator> {
        vec![TypingIndicator::assistant(&self.typing_label)]
    }
}

impl Default for TurnContext {
    fn default() -> Self {
        Self::from_config(&ChatConfig::default())
    }
}
