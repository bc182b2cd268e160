use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;

use crate::state::AppState;

pub const SSE_KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

fn envelope_to_sse_event(envelope: &events::EventEnvelope) -> Result<Event, Infallible> {
    let data = serde_json::to_string(&envelope).unwrap_or_else(|_| "{}".to_string());

    Ok(Event::default()
        .id(envelope.id.to_string())
        .event(envelope.event.type_tag())
        .data(data))
}

/// Stream run and role lifecycle events to the browser.
///
/// Subscribers only see events published after they connect; a client that
/// lags far enough to drop broadcast messages simply misses them.
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "SSE stream of crew events")
    ),
    tag = "events"
)]
pub async fn events_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.event_bus.subscribe();

    let stream = BroadcastStream::new(receiver).filter_map(|result| async move {
        match result {
            Ok(envelope) => Some(envelope_to_sse_event(&envelope)),
            // Lagged receiver; skip and continue with newer events.
            Err(_) => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(SSE_KEEP_ALIVE_INTERVAL))
}
