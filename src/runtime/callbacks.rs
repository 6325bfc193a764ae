//! Caller-supplied notification hooks

use crate::sender::SendError;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::mpsc;

pub type TextCallback = Arc<dyn Fn(&str) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(&SendError) + Send + Sync>;

/// Optional hooks invoked at most once per turn
///
/// Hooks run in order on a dedicated blocking thread, never on the session
/// task, so a slow hook delays later notifications but not the conversation.
/// A hook that panics is logged and otherwise ignored.
#[derive(Clone, Default)]
pub struct ChatCallbacks {
    on_message_sent: Option<TextCallback>,
    on_message_received: Option<TextCallback>,
    on_error: Option<ErrorCallback>,
}

impl ChatCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_message_sent(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_message_sent = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn on_message_received(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_message_received = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn on_error(mut self, f: impl Fn(&SendError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    fn is_empty(&self) -> bool {
        self.on_message_sent.is_none()
            && self.on_message_received.is_none()
            && self.on_error.is_none()
    }

    /// Start the delivery thread; it exits once the dispatcher is dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn into_dispatcher(self) -> CallbackDispatcher {
        if self.is_empty() {
            return CallbackDispatcher { tx: None };
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::task::spawn_blocking(move || {
            while let Some(notification) = rx.blocking_recv() {
                self.deliver(notification);
            }
            tracing::debug!("Callback dispatcher stopped");
        });
        CallbackDispatcher { tx: Some(tx) }
    }

    fn deliver(&self, notification: Notification) {
        match notification {
            Notification::Sent(text) => {
                if let Some(cb) = &self.on_message_sent {
                    invoke("on_message_sent", || cb(&text));
                }
            }
            Notification::Received(text) => {
                if let Some(cb) = &self.on_message_received {
                    invoke("on_message_received", || cb(&text));
                }
            }
            Notification::Error(error) => {
                if let Some(cb) = &self.on_error {
                    invoke("on_error", || cb(&error));
                }
            }
        }
    }
}

fn invoke(name: &'static str, f: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(f)).is_err() {
        tracing::warn!(callback = name, "Callback panicked");
    }
}

impl fmt::Debug for ChatCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCallbacks")
            .field("on_message_sent", &self.on_message_sent.is_some())
            .field("on_message_received", &self.on_message_received.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

#[derive(Debug)]
enum Notification {
    Sent(String),
    Received(String),
    Error(SendError),
}

/// Session-side end of the callback thread; queuing never blocks
#[derive(Debug)]
pub(crate) struct CallbackDispatcher {
    tx: Option<mpsc::UnboundedSender<Notification>>,
}

impl CallbackDispatcher {
    pub(crate) fn message_sent(&self, text: String) {
        self.queue(Notification::Sent(text));
    }

    pub(crate) fn message_received(&self, text: String) {
        self.queue(Notification::Received(text));
    }

    pub(crate) fn error(&self, error: SendError) {
        self.queue(Notification::Error(error));
    }

    fn queue(&self, notification: Notification) {
        if let Some(tx) = &self.tx {
            if tx.send(notification).is_err() {
                tracing::debug!("Callback dispatcher gone, dropping notification");
            }
        }
    }
}
