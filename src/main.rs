//! Contenta Chat - terminal demo
//!
//! Runs a session against an echo sender that streams the user's words back.
//! Usage: `contenta-chat [config.json]`

use contenta_chat::{
    ChatCallbacks, ChatConfig, ChatSession, Role, SendError, SenderAdapter, StoreEvent,
};
use futures::StreamExt;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const QUIT_COMMAND: &str = "/quit";
const ECHO_WORD_DELAY: Duration = Duration::from_millis(80);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contenta_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Configuration
    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(path = %path, "Loading chat config");
            ChatConfig::from_file(&path)?
        }
        None => ChatConfig::default(),
    }
    .with_env_overrides();

    let strings = config.strings();
    tracing::info!(locale = %config.locale(), "Chat config loaded");

    let callbacks = ChatCallbacks::new()
        .on_message_sent(|text| tracing::info!(chars = text.chars().count(), "Message sent"))
        .on_message_received(|text| {
            tracing::info!(chars = text.chars().count(), "Message received");
        })
        .on_error(|error: &SendError| tracing::warn!(kind = error.kind.as_str(), %error, "Send failed"));

    let handle = ChatSession::new(config, echo_sender())
        .with_callbacks(callbacks)
        .start();
    let mut updates = handle.subscribe();

    println!("{} ({QUIT_COMMAND} to exit)", strings.placeholder);

    if handle.display().disabled {
        tracing::warn!("Chat is disabled by config, input will be ignored");
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == QUIT_COMMAND {
                    break;
                }

                handle.submit(line).await?;
                print!("{}: ", strings.assistant_name);
                render_turn(&mut updates).await;
            }

            Ok(event) = updates.recv() => {
                // Greeting arriving while the prompt is idle
                if let StoreEvent::MessageAppended(message) = event {
                    if message.sender == Role::Assistant {
                        println!("\r{}: {}", strings.assistant_name, message.content);
                    }
                }
            }
        }
    }

    handle.shutdown();
    tracing::info!("Chat demo exiting");
    Ok(())
}

/// Print store changes for one turn until the session is idle again
async fn render_turn(updates: &mut tokio::sync::broadcast::Receiver<StoreEvent>) {
    let mut printed = 0usize;
    loop {
        match updates.recv().await {
            Ok(StoreEvent::ContentUpdated { content, .. }) => {
                print!("{}", content.get(printed..).unwrap_or_default());
                printed = content.len();
                flush();
            }
            Ok(StoreEvent::MessageAppended(message)) if message.sender == Role::System => {
                print!("{}", message.content);
            }
            Ok(StoreEvent::BusyChanged(false)) => break,
            Ok(_) => {}
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Demo renderer lagged");
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
    println!();
}

/// Streams the submitted words back one at a time
fn echo_sender() -> SenderAdapter {
    SenderAdapter::stream_fn(|text: String| {
        let words: Vec<String> = text
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| if i == 0 { word.to_string() } else { format!(" {word}") })
            .collect();
        futures::stream::iter(words).then(|word| async move {
            tokio::time::sleep(ECHO_WORD_DELAY).await;
            Ok::<_, SendError>(word)
        })
    })
}

fn prompt() {
    print!("> ");
    flush();
}

fn flush() {
    if let Err(e) = std::io::stdout().flush() {
        tracing::debug!(error = %e, "Failed to flush stdout");
    }
}
