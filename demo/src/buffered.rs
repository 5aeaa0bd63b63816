//! Buffered mode: each feed is assembled into one response inside axum.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{info, warn};
use turbosse::{ResponseEventStream, accepts_event_stream};

use crate::config::DemoConfig;
use crate::feed;

/// Build the router serving `GET /events`.
pub fn router(config: DemoConfig) -> Router {
    Router::new()
        .route("/events", get(events))
        .with_state(Arc::new(config))
}

/// Serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: DemoConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!(addr = %listener.local_addr()?, "buffered event-stream server listening");

    axum::serve(listener, router(config))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

async fn events(State(config): State<Arc<DemoConfig>>, headers: HeaderMap) -> Response {
    if !accepts_event_stream(&headers) {
        return (
            StatusCode::NOT_ACCEPTABLE,
            "this endpoint only serves text/event-stream",
        )
            .into_response();
    }

    match build_feed(&config) {
        Ok(response) => response.map(Body::from).into_response(),
        Err(e) => {
            warn!(error = %e, "failed to build event stream");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn build_feed(config: &DemoConfig) -> turbosse::StreamResult<http::Response<Bytes>> {
    let mut stream = ResponseEventStream::buffered(config.feed_stream_config())?;
    feed::run(&mut stream, config.event_count, || {})?;
    info!(stream_id = %stream.id(), events = config.event_count, "buffered feed built");
    stream.into_response()
}
