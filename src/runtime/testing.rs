//! Mock senders and session harness for testing
//!
//! These mocks enable end-to-end session tests without a real backend.

use super::{ChatCallbacks, ChatHandle, ChatSession};
use crate::config::ChatConfig;
use crate::conversation::{Message, StoreEvent};
use crate::sender::{
    ChunkStream, EnvelopeSender, ResponseEnvelope, SendError, SenderAdapter, StreamSender,
    TextSender,
};
use async_trait::async_trait;
use futures::StreamExt as _;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, Notify};

// ============================================================================
// Mock Text Sender
// ============================================================================

/// Text sender that returns queued replies
pub struct MockTextSender {
    replies: Mutex<VecDeque<Result<String, SendError>>>,
    /// Record of all messages sent
    pub requests: Mutex<Vec<String>>,
}

impl MockTextSender {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn queue_error(&self, error: SendError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextSender for MockTextSender {
    async fn send(&self, message: &str) -> Result<String, SendError> {
        self.requests.lock().unwrap().push(message.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SendError::failed("No mock reply queued")))
    }
}

// ============================================================================
// Gated Text Sender (for busy and teardown testing)
// ============================================================================

/// Text sender that holds every request until released
pub struct GatedTextSender {
    inner: MockTextSender,
    release: Arc<Notify>,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl GatedTextSender {
    pub fn new() -> Self {
        Self {
            inner: MockTextSender::new(),
            release: Arc::new(Notify::new()),
            request_started: Arc::new(Notify::new()),
        }
    }

    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.inner.queue_reply(reply);
    }

    /// Let one pending (or the next) request complete
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn recorded_requests(&self) -> Vec<String> {
        self.inner.recorded_requests()
    }
}

#[async_trait]
impl TextSender for GatedTextSender {
    async fn send(&self, message: &str) -> Result<String, SendError> {
        self.request_started.notify_one();
        self.release.notified().await;
        self.inner.send(message).await
    }
}

// ============================================================================
// Mock Envelope Sender
// ============================================================================

/// Envelope sender that returns a fixed envelope
pub struct MockEnvelopeSender {
    envelope: ResponseEnvelope,
}

impl MockEnvelopeSender {
    pub fn new(envelope: ResponseEnvelope) -> Self {
        Self { envelope }
    }
}

#[async_trait]
impl EnvelopeSender for MockEnvelopeSender {
    async fn send(&self, _message: &str) -> Result<ResponseEnvelope, SendError> {
        Ok(self.envelope.clone())
    }
}

// ============================================================================
// Scripted Stream Sender
// ============================================================================

/// Stream sender that yields a fixed script of fragments
pub struct ScriptedStreamSender {
    script: Vec<Result<String, SendError>>,
    open_error: Option<SendError>,
    /// Number of items actually pulled from the stream
    pub pulled: Arc<Mutex<usize>>,
}

impl ScriptedStreamSender {
    pub fn new(chunks: &[&str]) -> Self {
        Self {
            script: chunks.iter().map(|c| Ok((*c).to_string())).collect(),
            open_error: None,
            pulled: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_script(script: Vec<Result<String, SendError>>) -> Self {
        Self {
            script,
            open_error: None,
            pulled: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing_open(error: SendError) -> Self {
        Self {
            script: Vec::new(),
            open_error: Some(error),
            pulled: Arc::new(Mutex::new(0)),
        }
    }
}

impl StreamSender for ScriptedStreamSender {
    fn open(&self, _message: &str) -> Result<ChunkStream, SendError> {
        if let Some(error) = &self.open_error {
            return Err(error.clone());
        }
        let pulled = self.pulled.clone();
        let items = self.script.clone();
        Ok(futures::stream::iter(items)
            .inspect(move |_| *pulled.lock().unwrap() += 1)
            .boxed())
    }
}

// ============================================================================
// Panicking Sender
// ============================================================================

pub struct PanickingSender;

#[async_trait]
impl TextSender for PanickingSender {
    async fn send(&self, _message: &str) -> Result<String, SendError> {
        panic!("sender exploded");
    }
}

// ============================================================================
// Callback Recorder
// ============================================================================

/// Records every callback invocation as `"<hook>:<payload>"`
#[derive(Clone, Default)]
pub struct CallbackLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallbackLog {
    pub fn callbacks(&self) -> ChatCallbacks {
        let sent = self.entries.clone();
        let received = self.entries.clone();
        let errors = self.entries.clone();
        ChatCallbacks::new()
            .on_message_sent(move |text| sent.lock().unwrap().push(format!("sent:{text}")))
            .on_message_received(move |text| {
                received.lock().unwrap().push(format!("received:{text}"));
            })
            .on_error(move |error| errors.lock().unwrap().push(format!("error:{error}")))
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Wait until at least `count` hooks have run (they run off the session task)
    pub async fn wait_for_entries(&self, count: usize) -> Vec<String> {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            let entries = self.entries();
            if entries.len() >= count || tokio::time::Instant::now() >= deadline {
                return entries;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

// ============================================================================
// Test Session Builder
// ============================================================================

/// Helper for driving a session with minimal boilerplate
pub struct TestSession {
    pub handle: ChatHandle,
    pub events_rx: broadcast::Receiver<StoreEvent>,
    pub log: CallbackLog,
    /// Every store event observed so far
    pub seen: Vec<StoreEvent>,
}

impl TestSession {
    pub fn start(adapter: SenderAdapter) -> Self {
        Self::start_with_config(adapter, ChatConfig::default())
    }

    pub fn start_with_config(adapter: SenderAdapter, config: ChatConfig) -> Self {
        let log = CallbackLog::default();
        let handle = ChatSession::new(config, adapter)
            .with_callbacks(log.callbacks())
            .start();
        let events_rx = handle.subscribe();
        Self {
            handle,
            events_rx,
            log,
            seen: Vec::new(),
        }
    }

    pub async fn submit(&self, text: &str) {
        self.handle.submit(text).await.unwrap();
    }

    /// Wait for the next store event matching `pred`
    pub async fn wait_for(
        &mut self,
        pred: impl Fn(&StoreEvent) -> bool,
        timeout: Duration,
    ) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match tokio::time::timeout_at(deadline, self.events_rx.recv()).await {
                Ok(Ok(event)) => {
                    let matched = pred(&event);
                    self.seen.push(event);
                    if matched {
                        return true;
                    }
                }
                Ok(Err(broadcast::error::RecvError::Lagged(_))) => {}
                Ok(Err(broadcast::error::RecvError::Closed)) | Err(_) => return false,
            }
        }
    }

    /// Wait until the current turn has cleaned up
    pub async fn wait_for_idle(&mut self, timeout: Duration) -> bool {
        self.wait_for(|e| matches!(e, StoreEvent::BusyChanged(false)), timeout)
            .await
    }

    pub fn messages(&self) -> Vec<Message> {
        self.handle.store().messages()
    }

    /// Content values published for a message, in order
    pub fn content_updates(&self, id: &str) -> Vec<String> {
        self.seen
            .iter()
            .filter_map(|e| match e {
                StoreEvent::ContentUpdated { id: updated, content } if updated == id => {
                    Some(content.clone())
                }
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crate::locale::Locale;
    use crate::runtime::ChatError;
    use crate::sender::SendErrorKind;

    const WAIT: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn test_mock_text_sender() {
        let mock = MockTextSender::new();
        mock.queue_reply("Hello");

        assert_eq!(mock.send("hi").await.unwrap(), "Hello");
        // Second call should fail (no more replies)
        assert!(mock.send("hi").await.is_err());
        assert_eq!(mock.recorded_requests(), vec!["hi", "hi"]);
    }

    /// Integration test: single reply
    #[tokio::test]
    async fn test_simple_text_reply() {
        let sender = Arc::new(MockTextSender::new());
        sender.queue_reply("Hello!");

        let mut rt = TestSession::start(SenderAdapter::Text(sender.clone()));
        rt.submit("Hi").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].sender, Role::User);
        assert_eq!(msgs[0].content, "Hi");
        assert_eq!(msgs[1].sender, Role::Assistant);
        assert_eq!(msgs[1].content, "Hello!");
        assert_eq!(msgs[1].display_name.as_deref(), Some("Assistant"));
        assert_eq!(sender.recorded_requests(), vec!["Hi"]);
        assert_eq!(rt.log.wait_for_entries(2).await, vec!["sent:Hi", "received:Hello!"]);

        let snapshot = rt.handle.snapshot();
        assert!(snapshot.typing.is_empty());
        assert!(!snapshot.is_awaiting_response);
    }

    /// Integration test: streamed fragments are visible as they arrive
    #[tokio::test]
    async fn test_streamed_reply_intermediate_states() {
        let mut rt = TestSession::start(SenderAdapter::stream(ScriptedStreamSender::new(&[
            "He", "llo",
        ])));
        rt.submit("Hi").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1].content, "Hello");
        assert_eq!(rt.content_updates(&msgs[1].id), vec!["He", "Hello"]);
        assert_eq!(rt.log.wait_for_entries(2).await, vec!["sent:Hi", "received:Hello"]);
    }

    /// Integration test: ordering within one turn
    #[tokio::test]
    async fn test_turn_event_order() {
        let mut rt = TestSession::start(SenderAdapter::stream(ScriptedStreamSender::new(&[
            "a", "b",
        ])));
        rt.submit("go").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let kinds: Vec<&str> = rt
            .seen
            .iter()
            .map(|e| match e {
                StoreEvent::MessageAppended(m) if m.sender == Role::User => "user",
                StoreEvent::MessageAppended(_) => "placeholder",
                StoreEvent::BusyChanged(true) => "busy",
                StoreEvent::BusyChanged(false) => "idle",
                StoreEvent::TypingChanged(t) if t.is_empty() => "typing_off",
                StoreEvent::TypingChanged(_) => "typing_on",
                StoreEvent::ContentUpdated { .. } => "content",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "user",
                "busy",
                "typing_on",
                "placeholder",
                "typing_off",
                "content",
                "content",
                "idle"
            ]
        );
    }

    /// Integration test: rejected call produces one system message
    #[tokio::test]
    async fn test_sender_error_recovers() {
        let sender = MockTextSender::new();
        sender.queue_error(SendError::failed("503 Service Unavailable"));

        let mut rt = TestSession::start(SenderAdapter::text(sender));
        rt.submit("Hi").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        let system: Vec<_> = msgs.iter().filter(|m| m.sender == Role::System).collect();
        assert_eq!(system.len(), 1);
        assert_eq!(
            system[0].content,
            Locale::EnUs.strings().error_message
        );
        assert_eq!(
            rt.log.wait_for_entries(2).await,
            vec!["sent:Hi", "error:503 Service Unavailable"]
        );

        let snapshot = rt.handle.snapshot();
        assert!(snapshot.typing.is_empty());
        assert!(!snapshot.is_awaiting_response);
    }

    /// Integration test: custom error string is used
    #[tokio::test]
    async fn test_custom_error_message() {
        let config = ChatConfig {
            locale: Some("pt-BR".to_string()),
            error_message: Some("Ocorreu uma falha na comunicação.".to_string()),
            ..ChatConfig::default()
        };
        let mut rt = TestSession::start_with_config(
            SenderAdapter::text(MockTextSender::new()),
            config,
        );
        rt.submit("Oi").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert_eq!(msgs.last().unwrap().content, "Ocorreu uma falha na comunicação.");
        assert_eq!(msgs[1].display_name.as_deref(), Some("Assistente"));
    }

    /// Integration test: `success: false` is a failure, not a reply
    #[tokio::test]
    async fn test_unsuccessful_envelope_is_failure() {
        let mut rt = TestSession::start(SenderAdapter::envelope(MockEnvelopeSender::new(
            ResponseEnvelope::failed("x"),
        )));
        rt.submit("Hi").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert!(msgs.iter().all(|m| m.content != "x"));
        assert_eq!(msgs.iter().filter(|m| m.sender == Role::System).count(), 1);
        assert_eq!(rt.log.wait_for_entries(2).await, vec!["sent:Hi", "error:x"]);
    }

    #[tokio::test]
    async fn test_successful_envelope_is_reply() {
        let mut rt = TestSession::start(SenderAdapter::envelope(MockEnvelopeSender::new(
            ResponseEnvelope::ok("Olá!"),
        )));
        rt.submit("Oi").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1].content, "Olá!");
    }

    /// Integration test: stream error stops consumption
    #[tokio::test]
    async fn test_stream_error_mid_iteration() {
        let sender = ScriptedStreamSender::with_script(vec![
            Ok("par".to_string()),
            Err(SendError::interrupted("connection reset")),
            Ok("never".to_string()),
        ]);
        let pulled = sender.pulled.clone();

        let mut rt = TestSession::start(SenderAdapter::stream(sender));
        rt.submit("Hi").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1].content, "par");
        assert_eq!(msgs[2].sender, Role::System);
        assert_eq!(*pulled.lock().unwrap(), 2);
        assert_eq!(rt.log.wait_for_entries(2).await, vec!["sent:Hi", "error:connection reset"]);
    }

    #[tokio::test]
    async fn test_stream_open_failure() {
        let mut rt = TestSession::start(SenderAdapter::stream(ScriptedStreamSender::failing_open(
            SendError::failed("bad agent id"),
        )));
        rt.submit("Hi").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert_eq!(msgs.last().unwrap().sender, Role::System);
        assert_eq!(rt.log.wait_for_entries(2).await, vec!["sent:Hi", "error:bad agent id"]);
    }

    #[tokio::test]
    async fn test_empty_stream_completes() {
        let mut rt = TestSession::start(SenderAdapter::stream(ScriptedStreamSender::new(&[])));
        rt.submit("Hi").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1].content, "");
        assert!(rt.handle.snapshot().typing.is_empty());
        assert_eq!(rt.log.wait_for_entries(2).await, vec!["sent:Hi", "received:"]);
    }

    /// Integration test: a panicking adapter is a failure and the session survives
    #[tokio::test]
    async fn test_panicking_sender_is_failure() {
        let mut rt = TestSession::start(SenderAdapter::text(PanickingSender));
        rt.submit("Hi").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert_eq!(msgs.last().unwrap().sender, Role::System);
        assert!(rt.log.wait_for_entries(2).await.contains(&"error:sender exploded".to_string()));

        rt.submit("again").await;
        assert!(rt.wait_for_idle(WAIT).await);
        assert_eq!(
            rt.messages().iter().filter(|m| m.sender == Role::User).count(),
            2
        );
    }

    /// Integration test: double submit while busy is dropped, not queued
    #[tokio::test]
    async fn test_submit_while_busy_is_dropped() {
        let sender = Arc::new(GatedTextSender::new());
        sender.queue_reply("first reply");
        sender.queue_reply("should never be used");

        let mut rt = TestSession::start(SenderAdapter::Text(sender.clone()));
        rt.submit("first").await;
        sender.request_started.notified().await;

        let before = rt.handle.store().len();
        rt.submit("second").await;
        sender.release();
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert_eq!(before, 2);
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].content, "first");
        assert_eq!(msgs[1].content, "first reply");
        assert_eq!(sender.recorded_requests(), vec!["first"]);
        assert_eq!(rt.log.wait_for_entries(2).await, vec!["sent:first", "received:first reply"]);
    }

    /// Integration test: blank input never touches the store
    #[tokio::test]
    async fn test_blank_submit_is_dropped() {
        let sender = MockTextSender::new();
        sender.queue_reply("ok");

        let mut rt = TestSession::start(SenderAdapter::text(sender));
        rt.submit("   \n ").await;
        rt.submit("real").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let msgs = rt.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].content, "real");
        assert_eq!(rt.log.wait_for_entries(2).await, vec!["sent:real", "received:ok"]);
    }

    #[tokio::test]
    async fn test_sequential_turns() {
        let sender = MockTextSender::new();
        sender.queue_reply("one");
        sender.queue_reply("two");

        let mut rt = TestSession::start(SenderAdapter::text(sender));
        rt.submit("1").await;
        assert!(rt.wait_for_idle(WAIT).await);
        rt.submit("2").await;
        assert!(rt.wait_for_idle(WAIT).await);

        let contents: Vec<_> = rt.messages().into_iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["1", "one", "2", "two"]);
    }

    #[tokio::test]
    async fn test_composer_limits_apply_to_submit() {
        let sender = MockTextSender::new();
        sender.queue_reply("ok");
        let config = ChatConfig {
            max_length: 5,
            allow_multiline: false,
            ..ChatConfig::default()
        };

        let mut rt = TestSession::start_with_config(SenderAdapter::text(sender), config);
        rt.submit("hel\nlo world").await;
        assert!(rt.wait_for_idle(WAIT).await);
        assert_eq!(rt.messages()[0].content, "hel l");
    }

    #[tokio::test]
    async fn test_disabled_chat_drops_submissions() {
        let config = ChatConfig {
            disabled: true,
            ..ChatConfig::default()
        };
        let rt = TestSession::start_with_config(SenderAdapter::text(MockTextSender::new()), config);
        rt.submit("Hi").await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(rt.messages().is_empty());
        assert!(rt.log.entries().is_empty());
    }

    /// Integration test: a panicking callback does not wedge the turn
    #[tokio::test]
    async fn test_panicking_callback_is_contained() {
        let sender = MockTextSender::new();
        sender.queue_reply("fine");
        let handle = ChatSession::new(ChatConfig::default(), SenderAdapter::text(sender))
            .with_callbacks(ChatCallbacks::new().on_message_sent(|_| panic!("bad hook")))
            .start();
        let mut rx = handle.subscribe();
        handle.submit("Hi").await.unwrap();

        let finished = tokio::time::timeout(WAIT, async {
            while let Ok(event) = rx.recv().await {
                if event == StoreEvent::BusyChanged(false) {
                    return true;
                }
            }
            false
        })
        .await;
        assert_eq!(finished, Ok(true));
        assert_eq!(handle.snapshot().messages[1].content, "fine");
    }

    /// Integration test: a slow callback does not hold up the turn
    #[tokio::test]
    async fn test_slow_callback_does_not_block_turn() {
        let handle = ChatSession::new(
            ChatConfig::default(),
            SenderAdapter::stream(ScriptedStreamSender::new(&["a", "b", "c"])),
        )
        .with_callbacks(
            ChatCallbacks::new()
                .on_message_sent(|_| std::thread::sleep(Duration::from_millis(500))),
        )
        .start();
        let mut rx = handle.subscribe();
        handle.submit("Hi").await.unwrap();

        let finished = tokio::time::timeout(Duration::from_millis(250), async {
            while let Ok(event) = rx.recv().await {
                if event == StoreEvent::BusyChanged(false) {
                    return true;
                }
            }
            false
        })
        .await;
        assert_eq!(finished, Ok(true));
        assert_eq!(handle.snapshot().messages[1].content, "abc");
    }

    /// Integration test: greeting after delay
    #[tokio::test]
    async fn test_greeting_after_delay() {
        let config = ChatConfig::from_json_str(
            r#"{"greeting": {"enabled": true, "delay_ms": 20}, "locale": "pt-BR"}"#,
        )
        .unwrap();
        let mut rt =
            TestSession::start_with_config(SenderAdapter::text(MockTextSender::new()), config);

        assert!(
            rt.wait_for(|e| matches!(e, StoreEvent::MessageAppended(_)), WAIT)
                .await
        );
        let msgs = rt.messages();
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].id.starts_with("assistant-welcome-"));
        assert_eq!(msgs[0].content, "Como posso ajudá-lo hoje?");

        assert!(
            rt.wait_for(|e| matches!(e, StoreEvent::TypingChanged(t) if t.is_empty()), WAIT)
                .await
        );
        assert!(rt
            .seen
            .iter()
            .any(|e| matches!(e, StoreEvent::TypingChanged(t) if t.len() == 1)));
    }

    /// Integration test: teardown cancels the pending greeting
    #[tokio::test]
    async fn test_teardown_cancels_greeting() {
        let config = ChatConfig::from_json_str(
            r#"{"greeting": {"enabled": true, "delay_ms": 30}}"#,
        )
        .unwrap();
        let rt = TestSession::start_with_config(SenderAdapter::text(MockTextSender::new()), config);
        let store = rt.handle.store().clone();

        tokio::time::sleep(Duration::from_millis(5)).await;
        drop(rt);
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(store.is_empty());
    }

    /// Integration test: late results after teardown are discarded
    #[tokio::test]
    async fn test_teardown_discards_late_reply() {
        let sender = Arc::new(GatedTextSender::new());
        sender.queue_reply("too late");

        let rt = TestSession::start(SenderAdapter::Text(sender.clone()));
        rt.submit("Hi").await;
        sender.request_started.notified().await;

        rt.handle.shutdown();
        sender.release();
        tokio::time::sleep(Duration::from_millis(30)).await;

        let msgs = rt.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1].content, "");
        assert!(msgs.iter().all(|m| m.sender != Role::System));
        assert!(rt.handle.is_closed());
        assert!(matches!(
            rt.handle.submit("anyone there?").await,
            Err(ChatError::Closed)
        ));
    }

    #[test]
    fn test_send_error_kinds_display_message() {
        let err = SendError::unsuccessful("quota exceeded");
        assert_eq!(err.kind, SendErrorKind::Unsuccessful);
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
