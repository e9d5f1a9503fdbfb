use std::{convert::Infallible, time::Duration};

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::Stream;
use tokio::sync::broadcast::error::RecvError;

use crate::AppState;

// GET /notifications
pub async fn sse_notifications(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.cart.subscribe();

    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        let evt = match rx.recv().await {
            Ok(ev) => {
                let data = serde_json::to_string(&ev).unwrap_or_else(|_| "{}".to_string());
                Event::default().event(ev.name()).data(data)
            }
            Err(RecvError::Lagged(n)) => {
                tracing::debug!("notification subscriber lagged by {}", n);
                Event::default().event("ping").data("lagged")
            }
            Err(RecvError::Closed) => return None,
        };

        Some((Ok(evt), rx))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(20))
            .text("keep-alive"),
    )
}
