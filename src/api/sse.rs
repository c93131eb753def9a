//! Server-Sent Events support

use crate::runtime::SseEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_util::sync::CancellationToken;

/// Convert broadcast stream to SSE stream. Ends when `shutdown` fires.
pub fn sse_stream(
    init_event: SseEvent,
    broadcast_rx: tokio::sync::broadcast::Receiver<SseEvent>,
    shutdown: CancellationToken,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Create stream that starts with init event then broadcasts
    let init = stream::once(async move { Ok(sse_event_to_axum(init_event)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| async move {
        match result {
            Ok(event) => Some(Ok(sse_event_to_axum(event))),
            Err(_) => None, // Skip lagged messages
        }
    });

    let combined = init
        .chain(broadcasts)
        .take_until(shutdown.cancelled_owned());

    Sse::new(combined).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn sse_event_to_axum(event: SseEvent) -> Event {
    let (event_type, data) = match event {
        SseEvent::Init {
            session_id,
            dialog_state,
            messages,
        } => (
            "init",
            json!({
                "type": "init",
                "session_id": session_id,
                "dialog_state": dialog_state,
                "messages": messages
            }),
        ),
        SseEvent::Message { message } => (
            "message",
            json!({
                "type": "message",
                "message": message
            }),
        ),
    };

    Event::default().event(event_type).data(data.to_string())
}
