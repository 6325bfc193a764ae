//! Conversation store
//!
//! Holds the ordered messages, the typing set and the busy flag for one
//! session. Mutations are applied under a synchronous lock and then
//! broadcast as [`StoreEvent`]s, so a `snapshot()` taken by an observer
//! after receiving an event always reflects that event.

mod message;

pub use message::{Message, MessageStamp, Role, TypingIndicator, ASSISTANT_PARTICIPANT_ID};

use futures::stream::Stream;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

const EVENT_CAPACITY: usize = 256;

/// Mutation notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    MessageAppended(Message),
    ContentUpdated { id: String, content: String },
    TypingChanged(Vec<TypingIndicator>),
    BusyChanged(bool),
}

/// Point-in-time copy of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub typing: Vec<TypingIndicator>,
    pub is_awaiting_response: bool,
}

impl ConversationSnapshot {
    #[must_use]
    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Shared handle to a session's conversation state
#[derive(Clone)]
pub struct ConversationStore {
    inner: Arc<RwLock<ConversationSnapshot>>,
    events: broadcast::Sender<StoreEvent>,
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(ConversationSnapshot::default())),
            events,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ConversationSnapshot> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ConversationSnapshot> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    pub fn append(&self, message: Message) {
        {
            let mut state = self.write();
            if state.messages.iter().any(|m| m.id == message.id) {
                tracing::warn!(message_id = %message.id, "Duplicate message id, ignoring append");
                return;
            }
            state.messages.push(message.clone());
        }
        tracing::debug!(message_id = %message.id, sender = %message.sender, "Message appended");
        self.publish(StoreEvent::MessageAppended(message));
    }

    /// Replace the content of an existing message.
    ///
    /// Returns `false` without publishing anything when `id` is unknown.
    pub fn update_content(&self, id: &str, content: impl Into<String>) -> bool {
        let content = content.into();
        {
            let mut state = self.write();
            let Some(message) = state.messages.iter_mut().find(|m| m.id == id) else {
                return false;
            };
            if message.content == content {
                return true;
            }
            message.content.clone_from(&content);
        }
        self.publish(StoreEvent::ContentUpdated {
            id: id.to_string(),
            content,
        });
        true
    }

    pub fn set_typing(&self, indicators: Vec<TypingIndicator>) {
        {
            let mut state = self.write();
            if state.typing == indicators {
                return;
            }
            state.typing.clone_from(&indicators);
        }
        self.publish(StoreEvent::TypingChanged(indicators));
    }

    pub fn set_busy(&self, busy: bool) {
        {
            let mut state = self.write();
            if state.is_awaiting_response == busy {
                return;
            }
            state.is_awaiting_response = busy;
        }
        self.publish(StoreEvent::BusyChanged(busy));
    }

    #[must_use]
    pub fn snapshot(&self) -> ConversationSnapshot {
        self.read().clone()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.read().messages.clone()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.read().is_awaiting_response
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Mutation events as a stream; lagged events are skipped
    pub fn updates(&self) -> impl Stream<Item = StoreEvent> {
        BroadcastStream::new(self.subscribe()).filter_map(|result| match result {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(error = %e, "Store observer lagged");
                None
            }
        })
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("state", &*self.read())
            .finish_non_exhaustive()
    }
}
