//! Sender adapters
//!
//! The caller supplies exactly one adapter per session. The turn controller
//! consumes whichever shape it is handed and normalizes every failure mode
//! into a [`SendError`].

mod error;

pub use error::{SendError, SendErrorKind};

use async_trait::async_trait;
use futures::stream::{BoxStream, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Result envelope returned by adapters that report failure in-band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub response: String,
}

impl ResponseEnvelope {
    #[must_use]
    pub fn ok(response: impl Into<String>) -> Self {
        Self {
            success: true,
            response: response.into(),
        }
    }

    #[must_use]
    pub fn failed(response: impl Into<String>) -> Self {
        Self {
            success: false,
            response: response.into(),
        }
    }

    /// Treat `success: false` as an error even though the call itself succeeded
    ///
    /// # Errors
    /// Returns [`SendErrorKind::Unsuccessful`] carrying the response text.
    pub fn into_result(self) -> Result<String, SendError> {
        if self.success {
            Ok(self.response)
        } else {
            Err(SendError::unsuccessful(self.response))
        }
    }
}

/// Stream of reply fragments
pub type ChunkStream = BoxStream<'static, Result<String, SendError>>;

/// Adapter resolving to the full reply text
#[async_trait]
pub trait TextSender: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, SendError>;
}

/// Adapter resolving to a `{success, response}` envelope
#[async_trait]
pub trait EnvelopeSender: Send + Sync {
    async fn send(&self, message: &str) -> Result<ResponseEnvelope, SendError>;
}

/// Adapter yielding the reply incrementally
///
/// The stream is finite and consumed once. An `Err` from `open` is the
/// synchronous-failure case; an `Err` item ends consumption.
pub trait StreamSender: Send + Sync {
    fn open(&self, message: &str) -> Result<ChunkStream, SendError>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: TextSender + ?Sized> TextSender for Arc<T> {
    async fn send(&self, message: &str) -> Result<String, SendError> {
        (**self).send(message).await
    }
}

#[async_trait]
impl<T: EnvelopeSender + ?Sized> EnvelopeSender for Arc<T> {
    async fn send(&self, message: &str) -> Result<ResponseEnvelope, SendError> {
        (**self).send(message).await
    }
}

impl<T: StreamSender + ?Sized> StreamSender for Arc<T> {
    fn open(&self, message: &str) -> Result<ChunkStream, SendError> {
        (**self).open(message)
    }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// [`TextSender`] backed by an async closure
pub struct FnTextSender<F>(F);

#[async_trait]
impl<F, Fut> TextSender for FnTextSender<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, SendError>> + Send + 'static,
{
    async fn send(&self, message: &str) -> Result<String, SendError> {
        (self.0)(message.to_string()).await
    }
}

/// [`EnvelopeSender`] backed by an async closure
pub struct FnEnvelopeSender<F>(F);

#[async_trait]
impl<F, Fut> EnvelopeSender for FnEnvelopeSender<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ResponseEnvelope, SendError>> + Send + 'static,
{
    async fn send(&self, message: &str) -> Result<ResponseEnvelope, SendError> {
        (self.0)(message.to_string()).await
    }
}

/// [`StreamSender`] backed by a closure returning a stream
pub struct FnStreamSender<F>(F);

impl<F, S> StreamSender for FnStreamSender<F>
where
    F: Fn(String) -> S + Send + Sync + 'static,
    S: Stream<Item = Result<String, SendError>> + Send + 'static,
{
    fn open(&self, message: &str) -> Result<ChunkStream, SendError> {
        Ok((self.0)(message.to_string()).boxed())
    }
}

// ============================================================================
// Adapter union
// ============================================================================

/// The sender adapter handed to a chat session
#[derive(Clone)]
pub enum SenderAdapter {
    Text(Arc<dyn TextSender>),
    Envelope(Arc<dyn EnvelopeSender>),
    Stream(Arc<dyn StreamSender>),
}

impl SenderAdapter {
    #[must_use]
    pub fn text(sender: impl TextSender + 'static) -> Self {
        Self::Text(Arc::new(sender))
    }

    #[must_use]
    pub fn envelope(sender: impl EnvelopeSender + 'static) -> Self {
        Self::Envelope(Arc::new(sender))
    }

    #[must_use]
    pub fn stream(sender: impl StreamSender + 'static) -> Self {
        Self::Stream(Arc::new(sender))
    }

    #[must_use]
    pub fn text_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, SendError>> + Send + 'static,
    {
        Self::text(FnTextSender(f))
    }

    #[must_use]
    pub fn envelope_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ResponseEnvelope, SendError>> + Send + 'static,
    {
        Self::envelope(FnEnvelopeSender(f))
    }

    #[must_use]
    pub fn stream_fn<F, S>(f: F) -> Self
    where
        F: Fn(String) -> S + Send + Sync + 'static,
        S: Stream<Item = Result<String, SendError>> + Send + 'static,
    {
        Self::stream(FnStreamSender(f))
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Envelope(_) => "envelope",
            Self::Stream(_) => "stream",
        }
    }
}

impl fmt::Debug for SenderAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SenderAdapter").field(&self.kind()).finish()
    }
}
