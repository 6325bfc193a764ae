//! Events that drive the turn controller

use super::state::TurnId;
use crate::conversation::{MessageStamp, Role};
use crate::sender::SendError;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Session events
    Mount,
    GreetingDue {
        stamp: MessageStamp,
    },

    // User events
    Submit {
        turn: TurnId,
        text: String,
        stamp: MessageStamp,
    },

    // Turn lifecycle (generated by effects)
    Begin {
        turn: TurnId,
        stamp: MessageStamp,
    },
    Finally {
        turn: TurnId,
    },

    // Sender events
    Chunk {
        turn: TurnId,
        text: String,
    },
    StreamEnd {
        turn: TurnId,
    },
    Reply {
        turn: TurnId,
        text: String,
    },
    Failure {
        turn: TurnId,
        error: SendError,
        stamp: MessageStamp,
    },
}

impl Event {
    pub fn submit(turn: TurnId, text: impl Into<String>) -> Self {
        Event::Submit {
            turn,
            text: text.into(),
            stamp: MessageStamp::mint(Role::User),
        }
    }

    #[must_use]
    pub fn begin(turn: TurnId) -> Self {
        Event::Begin {
            turn,
            stamp: MessageStamp::mint(Role::Assistant),
        }
    }

    #[must_use]
    pub fn failure(turn: TurnId, error: SendError) -> Self {
        Event::Failure {
            turn,
            error,
            stamp: MessageStamp::mint(Role::System),
        }
    }

    #[must_use]
    pub fn greeting_due() -> Self {
        Event::GreetingDue {
            stamp: MessageStamp::welcome(),
        }
    }

    /// Turn this event belongs to, if it is turn-scoped
    #[must_use]
    pub fn turn(&self) -> Option<TurnId> {
        match self {
            Event::Mount | Event::GreetingDue { .. } => None,
            Event::Submit { turn, .. }
            | Event::Begin { turn, .. }
            | Event::Finally { turn }
            | Event::Chunk { turn, .. }
            | Event::StreamEnd { turn }
            | Event::Reply { turn, .. }
            | Event::Failure { turn, .. } => Some(*turn),
        }
    }

    /// Short name for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Event::Mount => "mount",
            Event::GreetingDue { .. } => "greeting_due",
            Event::Submit { .. } => "submit",
            Event::Begin { .. } => "begin",
            Event::Finally { .. } => "finally",
            Event::Chunk { .. } => "chunk",
            Event::StreamEnd { .. } => "stream_end",
            Event::Reply { .. } => "reply",
            Event::Failure { .. } => "failure",
        }
    }
}
