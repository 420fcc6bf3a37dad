use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::{
    broadcast::{self, error::RecvError},
    mpsc,
};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info};

use crate::{
    dto::{scoreboard::ScoreboardSnapshot, sse::ServerEvent},
    services::sse_events::{broadcast_info, broadcast_scoreboard},
    state::SharedState,
};

/// Subscribe a new display to the public stream and bring every display up to date.
///
/// The subscription is taken before the current scoreboard is broadcast, so the new
/// display is guaranteed to receive it.
pub async fn subscribe_public(state: &SharedState) -> broadcast::Receiver<ServerEvent> {
    let receiver = state.public_sse().subscribe();
    broadcast_info(state.public_sse(), "Display connected");

    let snapshot = state.with_controller(|c| c.snapshot()).await;
    broadcast_scoreboard(
        state.public_sse(),
        &ScoreboardSnapshot::new(&snapshot, state.roster()),
    );
    info!(
        displays = state.public_sse().subscriber_count(),
        "public SSE stream connected"
    );
    receiver
}

/// Convert a broadcast receiver into an SSE response, forwarding events until the
/// client disconnects.
pub fn to_sse_stream(
    mut receiver: broadcast::Receiver<ServerEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // small bounded channel between forwarder and response
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(8);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = tx.closed() => break,
                recv_result = receiver.recv() => {
                    match recv_result {
                        Ok(payload) => {
                            let mut event = Event::default().data(payload.data);
                            if let Some(name) = payload.event {
                                event = event.event(name);
                            }

                            if tx.send(Ok(event)).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(skipped)) => {
                            // The next scoreboard event carries the full state again.
                            debug!(skipped, "public SSE subscriber lagged");
                            continue;
                        }
                    }
                }
            }
        }

        info!("public SSE stream disconnected");
    });

    let stream = ReceiverStream::new(rx);
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[tokio::test]
    async fn new_display_receives_info_then_scoreboard() {
        let (state, _ticks) = AppState::new(&AppConfig::default());
        let mut rx = subscribe_public(&state).await;

        let info = rx.recv().await.unwrap();
        assert_eq!(info.event.as_deref(), Some("info"));
        let scoreboard = rx.recv().await.unwrap();
        assert_eq!(scoreboard.event.as_deref(), Some("scoreboard"));
        assert!(scoreboard.data.contains("\"clock\":\"12:00\""));
    }
}
