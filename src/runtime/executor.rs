//! Chat session executor

use super::callbacks::{CallbackDispatcher, ChatCallbacks};
use super::driver;
use crate::conversation::ConversationStore;
use crate::sender::SenderAdapter;
use crate::state_machine::{transition, Effect, Event, TurnContext, TurnState};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Single-task event loop that owns a session's state and store
pub struct ChatRuntime {
    context: TurnContext,
    state: TurnState,
    store: ConversationStore,
    adapter: SenderAdapter,
    callbacks: CallbackDispatcher,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    /// Cancelled on teardown; timers and sender tasks hold child tokens
    shutdown: CancellationToken,
    /// Token for the in-flight sender task
    sender_cancel_token: Option<CancellationToken>,
}

impl ChatRuntime {
    /// Must be called from within a tokio runtime (callbacks get their own thread).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        context: TurnContext,
        store: ConversationStore,
        adapter: SenderAdapter,
        callbacks: ChatCallbacks,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            context,
            state: TurnState::Idle,
            store,
            adapter,
            callbacks: callbacks.into_dispatcher(),
            event_rx,
            event_tx,
            shutdown,
            sender_cancel_token: None,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(adapter = self.adapter.kind(), "Starting chat runtime");

        self.process_event(Event::Mount);

        // Process events in a loop - no recursion
        loop {
            tokio::select! {
                biased;

                () = self.shutdown.cancelled() => break,

                Some(event) = self.event_rx.recv() => self.process_event(event),

                else => break,
            }
        }

        if let Some(token) = self.sender_cancel_token.take() {
            token.cancel();
        }
        tracing::info!(state = self.state.name(), "Chat runtime stopped");
    }

    /// Apply one event plus every event its effects generate
    fn process_event(&mut self, event: Event) {
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let event_name = current_event.name();

            // Pure state transition
            let result = match transition(&self.state, &self.context, current_event) {
                Ok(r) => r,
                Err(e) if e.is_silent() => {
                    tracing::debug!(
                        event = event_name,
                        state = self.state.name(),
                        reason = %e,
                        "Event dropped"
                    );
                    continue;
                }
                Err(e) => {
                    tracing::warn!(event = event_name, error = %e, "Rejected event");
                    continue;
                }
            };

            let old_state = std::mem::replace(&mut self.state, result.new_state);
            if old_state.name() != self.state.name() {
                tracing::debug!(
                    turn = ?self.state.turn().or(old_state.turn()),
                    from = old_state.name(),
                    to = self.state.name(),
                    event = event_name,
                    "Turn state changed"
                );
            }

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(effect) {
                    events_to_process.push(generated_event);
                }
            }
        }
    }

    /// Execute an effect and optionally return a generated event
    fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::AppendMessage(message) => {
                self.store.append(message);
                None
            }

            Effect::UpdateContent { id, content } => {
                if !self.store.update_content(&id, content) {
                    tracing::debug!(message_id = %id, "Content update for unknown message");
                }
                None
            }

            Effect::SetTyping(indicators) => {
                self.store.set_typing(indicators);
                None
            }

            Effect::SetBusy(busy) => {
                self.store.set_busy(busy);
                None
            }

            Effect::BeginTurn { turn } => Some(Event::begin(turn)),

            Effect::InvokeSender { turn, text } => {
                let cancel_token = self.shutdown.child_token();
                self.sender_cancel_token = Some(cancel_token.clone());
                tokio::spawn(driver::run(
                    self.adapter.clone(),
                    turn,
                    text,
                    self.event_tx.clone(),
                    cancel_token,
                ));
                None
            }

            Effect::FinishTurn { turn } => {
                // Nothing more may arrive for this turn
                if let Some(token) = self.sender_cancel_token.take() {
                    token.cancel();
                }
                Some(Event::Finally { turn })
            }

            Effect::ScheduleGreeting { delay } => {
                self.schedule_greeting(delay);
                None
            }

            Effect::NotifySent { text } => {
                self.callbacks.message_sent(text);
                None
            }

            Effect::NotifyReceived { text } => {
                self.callbacks.message_received(text);
                None
            }

            Effect::NotifyError { error } => {
                self.callbacks.error(error);
                None
            }
        }
    }

    fn schedule_greeting(&self, delay: Duration) {
        let cancel_token = self.shutdown.child_token();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;

                () = cancel_token.cancelled() => {
                    tracing::debug!("Greeting cancelled");
                }

                () = tokio::time::sleep(delay) => {
                    if event_tx.send(Event::greeting_due()).await.is_err() {
                        tracing::debug!("Session closed before greeting");
                    }
                }
            }
        });
    }
}
