//! Runtime for executing chat sessions
//!
//! A session is one tokio task running [`ChatRuntime`]. The embedding
//! application talks to it through a [`ChatHandle`] and observes it through
//! the shared [`ConversationStore`].

mod callbacks;
mod driver;
mod executor;

#[cfg(test)]
pub mod testing;

pub use callbacks::{ChatCallbacks, ErrorCallback, TextCallback};
pub use executor::ChatRuntime;

use crate::composer::Composer;
use crate::config::{ChatConfig, DisplayOptions};
use crate::conversation::{ConversationSnapshot, ConversationStore, StoreEvent};
use crate::sender::SenderAdapter;
use crate::state_machine::{Event, TurnContext, TurnId};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::{CancellationToken, DropGuard};

const EVENT_BUFFER: usize = 64;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Chat session has been shut down")]
    Closed,
}

/// Builder for a chat session
pub struct ChatSession {
    config: ChatConfig,
    adapter: SenderAdapter,
    callbacks: ChatCallbacks,
}

impl ChatSession {
    #[must_use]
    pub fn new(config: ChatConfig, adapter: SenderAdapter) -> Self {
        Self {
            config,
            adapter,
            callbacks: ChatCallbacks::default(),
        }
    }

    #[must_use]
    pub fn with_callbacks(mut self, callbacks: ChatCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Spawn the session on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn start(self) -> ChatHandle {
        let store = ConversationStore::new();
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let shutdown = CancellationToken::new();

        let runtime = ChatRuntime::new(
            TurnContext::from_config(&self.config),
            store.clone(),
            self.adapter,
            self.callbacks,
            event_rx,
            event_tx.clone(),
            shutdown.clone(),
        );
        tokio::spawn(runtime.run());

        ChatHandle {
            event_tx,
            store,
            display: self.config.display(),
            composer: Composer::from_config(&self.config),
            last_turn: AtomicU64::new(0),
            _teardown: shutdown.clone().drop_guard(),
            shutdown,
        }
    }
}

/// Handle to interact with a running chat session
///
/// Dropping the handle tears the session down.
pub struct ChatHandle {
    event_tx: mpsc::Sender<Event>,
    store: ConversationStore,
    display: DisplayOptions,
    composer: Composer,
    last_turn: AtomicU64,
    shutdown: CancellationToken,
    _teardown: DropGuard,
}

impl ChatHandle {
    /// Submit user input.
    ///
    /// Blank input, input while a response is in progress, and input while
    /// the chat is disabled are dropped silently.
    ///
    /// # Errors
    /// Returns [`ChatError::Closed`] once the session has been shut down.
    pub async fn submit(&self, text: impl AsRef<str>) -> Result<(), ChatError> {
        if self.shutdown.is_cancelled() {
            return Err(ChatError::Closed);
        }
        if self.display.disabled {
            tracing::debug!("Chat disabled, dropping submission");
            return Ok(());
        }

        let text = self.composer.prepare(text.as_ref());
        let turn = TurnId(self.last_turn.fetch_add(1, Ordering::Relaxed)).next();
        self.event_tx
            .send(Event::submit(turn, text))
            .await
            .map_err(|_| ChatError::Closed)
    }

    #[must_use]
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    #[must_use]
    pub fn snapshot(&self) -> ConversationSnapshot {
        self.store.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }

    #[must_use]
    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Tear the session down: pending greeting and in-flight responses are discarded
    pub fn shutdown(&self) {
        tracing::debug!("Shutting down chat session");
        self.shutdown.cancel();
    }
}
