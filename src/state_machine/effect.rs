//! Effects produced by state transitions

use super::state::TurnId;
use crate::conversation::{Message, TypingIndicator};
use crate::sender::SendError;
use std::time::Duration;

/// Effects to be executed after a state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Add a message to the conversation store
    AppendMessage(Message),

    /// Replace the content of an existing message
    UpdateContent { id: String, content: String },

    /// Replace the typing indicator set
    SetTyping(Vec<TypingIndicator>),

    /// Publish the busy flag
    SetBusy(bool),

    /// Feed `Event::Begin` back into the state machine
    BeginTurn { turn: TurnId },

    /// Invoke the sender adapter (spawns as background task)
    InvokeSender { turn: TurnId, text: String },

    /// Feed `Event::Finally` back into the state machine
    FinishTurn { turn: TurnId },

    /// Start the welcome-message timer
    ScheduleGreeting { delay: Duration },

    /// Caller callbacks
    NotifySent { text: String },
    NotifyReceived { text: String },
    NotifyError { error: SendError },
}

impl Effect {
    #[must_use]
    pub fn clear_typing() -> Self {
        Effect::SetTyping(Vec::new())
    }

    pub fn update_content(id: impl Into<String>, content: impl Into<String>) -> Self {
        Effect::UpdateContent {
            id: id.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn notify_sent(text: impl Into<String>) -> Self {
        Effect::NotifySent { text: text.into() }
    }

    #[must_use]
    pub fn notify_received(text: impl Into<String>) -> Self {
        Effect::NotifyReceived { text: text.into() }
    }
}
