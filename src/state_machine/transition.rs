//! Pure state transition function
//!
//! Given the same state, context and event this always yields the same
//! result. Ids and timestamps arrive pre-minted inside events.

use super::{Effect, Event, TurnContext, TurnState};
use crate::conversation::Message;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: TurnState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    #[must_use]
    pub fn new(state: TurnState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Rejected events; none of them change state or produce effects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("A response is already in progress")]
    Busy,
    #[error("Event belongs to a turn that is no longer active")]
    StaleEvent,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl TransitionError {
    /// Validation rejections are dropped without telling the user
    #[must_use]
    pub fn is_silent(&self) -> bool {
        !matches!(self, TransitionError::InvalidTransition(_))
    }
}

/// Pure transition function
#[allow(clippy::too_many_lines)] // One arm per edge of the turn lifecycle
pub fn transition(
    state: &TurnState,
    context: &TurnContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    // Turn-scoped events for a turn other than the active one are late
    // deliveries from an abandoned turn.
    let opens_turn = matches!(event, Event::Submit { .. });
    if !opens_turn && event.turn().is_some() && event.turn() != state.turn() {
        return Err(TransitionError::StaleEvent);
    }

    match (state, event) {
        // ============================================================
        // Greeting
        // ============================================================
        (TurnState::Idle, Event::Mount) => match context.greeting_delay {
            Some(delay) => Ok(TransitionResult::new(TurnState::Idle)
                .with_effect(Effect::SetTyping(context.assistant_typing()))
                .with_effect(Effect::ScheduleGreeting { delay })),
            None => Ok(TransitionResult::new(TurnState::Idle)),
        },

        // Idle + GreetingDue -> Idle, indicator goes away with the greeting
        (TurnState::Idle, Event::GreetingDue { stamp }) => Ok(TransitionResult::new(TurnState::Idle)
            .with_effect(Effect::AppendMessage(Message::assistant(
                stamp,
                &context.assistant_name,
                &context.welcome_message,
            )))
            .with_effect(Effect::clear_typing())),

        // Busy + GreetingDue -> unchanged, the turn owns the indicator
        (state, Event::GreetingDue { stamp }) => Ok(TransitionResult::new(state.clone())
            .with_effect(Effect::AppendMessage(Message::assistant(
                stamp,
                &context.assistant_name,
                &context.welcome_message,
            )))),

        // ============================================================
        // Submission
        // ============================================================
        (_, Event::Submit { text, .. }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyMessage)
        }

        // Idle + Submit -> UserCommitted
        (TurnState::Idle, Event::Submit { turn, text, stamp }) => {
            Ok(TransitionResult::new(TurnState::UserCommitted {
                turn,
                text: text.clone(),
            })
            .with_effect(Effect::AppendMessage(Message::user(stamp, text.clone())))
            .with_effect(Effect::notify_sent(text))
            .with_effect(Effect::BeginTurn { turn }))
        }

        (_, Event::Submit { .. }) => Err(TransitionError::Busy),

        // UserCommitted + Begin -> AwaitingResponse
        (TurnState::UserCommitted { turn, text }, Event::Begin { stamp, .. }) => {
            let reply_id = stamp.id.clone();
            Ok(TransitionResult::new(TurnState::AwaitingResponse {
                turn: *turn,
                reply_id,
            })
            .with_effect(Effect::SetBusy(true))
            .with_effect(Effect::SetTyping(context.assistant_typing()))
            .with_effect(Effect::AppendMessage(Message::assistant(
                stamp,
                &context.assistant_name,
                "",
            )))
            .with_effect(Effect::InvokeSender {
                turn: *turn,
                text: text.clone(),
            }))
        }

        // ============================================================
        // Response processing
        // ============================================================

        // AwaitingResponse + Chunk -> Streaming
        (TurnState::AwaitingResponse { turn, reply_id }, Event::Chunk { text, .. }) => {
            Ok(TransitionResult::new(TurnState::Streaming {
                turn: *turn,
                reply_id: reply_id.clone(),
                content: text.clone(),
            })
            .with_effect(Effect::clear_typing())
            .with_effect(Effect::update_content(reply_id, text)))
        }

        // Streaming + Chunk -> Streaming (append)
        (
            TurnState::Streaming {
                turn,
                reply_id,
                content,
            },
            Event::Chunk { text, .. },
        ) => {
            let content = format!("{content}{text}");
            Ok(TransitionResult::new(TurnState::Streaming {
                turn: *turn,
                reply_id: reply_id.clone(),
                content: content.clone(),
            })
            .with_effect(Effect::update_content(reply_id, content)))
        }

        // AwaitingResponse + StreamEnd -> Completed (stream yielded nothing)
        (TurnState::AwaitingResponse { turn, .. }, Event::StreamEnd { .. }) => {
            Ok(TransitionResult::new(TurnState::Completed {
                turn: *turn,
                reply: String::new(),
            })
            .with_effect(Effect::clear_typing())
            .with_effect(Effect::notify_received(""))
            .with_effect(Effect::FinishTurn { turn: *turn }))
        }

        // Streaming + StreamEnd -> Completed
        (TurnState::Streaming { turn, content, .. }, Event::StreamEnd { .. }) => {
            Ok(TransitionResult::new(TurnState::Completed {
                turn: *turn,
                reply: content.clone(),
            })
            .with_effect(Effect::notify_received(content))
            .with_effect(Effect::FinishTurn { turn: *turn }))
        }

        // AwaitingResponse + Reply -> Completed
        (TurnState::AwaitingResponse { turn, reply_id }, Event::Reply { text, .. }) => {
            Ok(TransitionResult::new(TurnState::Completed {
                turn: *turn,
                reply: text.clone(),
            })
            .with_effect(Effect::clear_typing())
            .with_effect(Effect::update_content(reply_id, text.clone()))
            .with_effect(Effect::notify_received(text))
            .with_effect(Effect::FinishTurn { turn: *turn }))
        }

        // ============================================================
        // Failure
        // ============================================================
        (
            TurnState::UserCommitted { turn, .. }
            | TurnState::AwaitingResponse { turn, .. }
            | TurnState::Streaming { turn, .. },
            Event::Failure { error, stamp, .. },
        ) => Ok(TransitionResult::new(TurnState::ErrorRecovery {
            turn: *turn,
            error: error.clone(),
        })
        .with_effect(Effect::AppendMessage(Message::system(
            stamp,
            &context.error_message,
        )))
        .with_effect(Effect::NotifyError { error })
        .with_effect(Effect::FinishTurn { turn: *turn })),

        // ============================================================
        // Cleanup: runs on both paths
        // ============================================================
        (
            TurnState::Completed { .. } | TurnState::ErrorRecovery { .. },
            Event::Finally { .. },
        ) => Ok(TransitionResult::new(TurnState::Idle)
            .with_effect(Effect::clear_typing())
            .with_effect(Effect::SetBusy(false))),

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {} with event {}",
            state.name(),
            event.name()
        ))),
    }
}
