use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tracing::warn;

use parley_core::{ChatClient, EventQueue, QueueItem, QueueTransport};

use crate::input::{handle_key, Action};
use crate::render::render;
use crate::ui::compose::Outbound;
use crate::ui::{App, InputMode, Tui};

/// How long to wait for input after an idle poll cycle before asking the
/// server again. Pacing lives here in the consumer, not in the queue.
const IDLE_POLL_DELAY: Duration = Duration::from_secs(1);

pub(crate) async fn run_app<T: QueueTransport>(
    terminal: &mut Tui,
    app: &mut App,
    client: &ChatClient,
    queue: &mut EventQueue<T>,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    while app.running {
        terminal.draw(|frame| render(frame, app))?;

        // While composing, the queue sits untouched; it tolerates the
        // pause, and the composed message will come back through it.
        if app.input_mode == InputMode::Compose {
            match event_stream.next().await {
                Some(Ok(Event::Key(key))) => {
                    let action = handle_key(app, key);
                    perform(app, client, action).await;
                }
                Some(_) => {}
                None => app.quit(),
            }
            continue;
        }

        match queue.next().await.context("event stream failed")? {
            QueueItem::Message(message) => app.push_message(message),
            QueueItem::Idle => {
                tokio::select! {
                    maybe_event = event_stream.next() => {
                        match maybe_event {
                            Some(Ok(Event::Key(key))) => {
                                let action = handle_key(app, key);
                                perform(app, client, action).await;
                            }
                            Some(_) => {}
                            None => app.quit(),
                        }
                    }
                    _ = tokio::time::sleep(IDLE_POLL_DELAY) => {}
                }
            }
        }
    }

    Ok(())
}

/// Run the outbound request a key handler produced. Failures land in the
/// status line; they do not terminate the client.
async fn perform(app: &mut App, client: &ChatClient, action: Action) {
    let Action::Send(outbound) = action else {
        return;
    };

    let result = match &outbound {
        Outbound::Private { recipient, content } => {
            client.send_private_message(recipient, content).await
        }
        Outbound::Stream {
            channel,
            subject,
            content,
        } => client.send_stream_message(channel, subject, content).await,
        Outbound::Join { channel } => {
            let result = client.subscribe(std::slice::from_ref(channel)).await;
            if result.is_ok() {
                app.add_channel(channel);
            }
            result
        }
    };

    match (&outbound, result) {
        (_, Err(err)) => {
            warn!(%err, "outbound request failed");
            app.set_status(format!("Send failed: {err}"));
        }
        (Outbound::Join { channel }, Ok(())) => {
            app.set_status(format!("Joined {channel}"));
        }
        _ => {}
    }
}
