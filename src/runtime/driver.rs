//! Background task that invokes the sender adapter for one turn
//!
//! Whatever shape the adapter has, its outcome comes back to the session
//! loop as `Chunk`/`Reply`/`StreamEnd`/`Failure` events. Panics inside the
//! adapter are caught and reported as failures so a turn can never hang.

use crate::sender::{
    EnvelopeSender as _, ResponseEnvelope, SendError, SenderAdapter, StreamSender, TextSender as _,
};
use crate::state_machine::{Event, TurnId};
use futures::{FutureExt, StreamExt};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub(super) async fn run(
    adapter: SenderAdapter,
    turn: TurnId,
    text: String,
    events: mpsc::Sender<Event>,
    cancel: CancellationToken,
) {
    tracing::debug!(turn = %turn, adapter = adapter.kind(), "Invoking sender (background)");

    tokio::select! {
        biased;

        () = cancel.cancelled() => {
            tracing::debug!(turn = %turn, "Sender cancelled, discarding response");
        }

        outcome = AssertUnwindSafe(deliver(&adapter, turn, &text, &events)).catch_unwind() => {
            if let Err(panic) = outcome {
                let message = panic_message(panic.as_ref());
                tracing::error!(turn = %turn, panic = %message, "Sender adapter panicked");
                send(&events, Event::failure(turn, SendError::panicked(message))).await;
            }
        }
    }
}

async fn deliver(
    adapter: &SenderAdapter,
    turn: TurnId,
    text: &str,
    events: &mpsc::Sender<Event>,
) {
    let outcome = match adapter {
        SenderAdapter::Text(sender) => sender
            .send(text)
            .await
            .map(|reply| Event::Reply { turn, text: reply }),
        SenderAdapter::Envelope(sender) => sender
            .send(text)
            .await
            .and_then(ResponseEnvelope::into_result)
            .map(|reply| Event::Reply { turn, text: reply }),
        SenderAdapter::Stream(sender) => stream_reply(sender, turn, text, events)
            .await
            .map(|()| Event::StreamEnd { turn }),
    };

    let event = outcome.unwrap_or_else(|error| {
        tracing::warn!(turn = %turn, kind = error.kind.as_str(), error = %error, "Sender failed");
        Event::failure(turn, error)
    });
    send(events, event).await;
}

/// Forward fragments in yield order; the first `Err` item ends consumption
/// and is reported as [`SendErrorKind::Interrupted`](crate::sender::SendErrorKind)
async fn stream_reply(
    sender: &Arc<dyn StreamSender>,
    turn: TurnId,
    text: &str,
    events: &mpsc::Sender<Event>,
) -> Result<(), SendError> {
    let mut stream = sender.open(text)?;
    let mut received = 0usize;

    while let Some(item) = stream.next().await {
        let chunk = item.map_err(|e| {
            tracing::debug!(turn = %turn, received, "Stream raised mid-iteration");
            SendError::interrupted(e.message)
        })?;
        received += 1;
        if events
            .send(Event::Chunk { turn, text: chunk })
            .await
            .is_err()
        {
            // Session is gone, stop pulling
            return Ok(());
        }
    }

    tracing::debug!(turn = %turn, received, "Stream finished");
    Ok(())
}

async fn send(events: &mpsc::Sender<Event>, event: Event) {
    if events.send(event).await.is_err() {
        tracing::debug!("Session closed, dropping sender event");
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "sender panicked".to_string()
    }
}
