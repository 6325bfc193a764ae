//! Contenta Chat - turn controller for an embeddable chat widget
//!
//! A session owns one conversation: it records what the user typed, asks a
//! caller-supplied sender for the assistant's answer, and publishes every
//! change through a [`ConversationStore`] the embedding UI renders from.

pub mod composer;
pub mod config;
pub mod conversation;
pub mod locale;
pub mod runtime;
pub mod sender;
pub mod state_machine;

pub use config::{ChatConfig, ConfigError};
pub use conversation::{ConversationStore, Message, Role, StoreEvent};
pub use locale::Locale;
pub use runtime::{ChatCallbacks, ChatError, ChatHandle, ChatSession};
pub use sender::{ResponseEnvelope, SendError, SenderAdapter};
