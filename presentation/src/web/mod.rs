//! Web form surface
//!
//! Serves a single HTML page with the URL and question inputs, plus JSON
//! endpoints for the same two operations. Each browser gets its own
//! session, keyed by the `pagerag_session` cookie.

mod handlers;
pub mod page;
pub mod sessions;

pub use sessions::{SESSION_COOKIE, SessionRegistry};

use axum::Router;
use axum::routing::{get, post};
use pagerag_application::{ContentScraper, SessionBackend};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the router for the web surface
pub fn router<S, B>(registry: Arc<SessionRegistry<S, B>>) -> Router
where
    S: ContentScraper + 'static,
    B: SessionBackend + 'static,
{
    Router::new()
        .route("/", get(handlers::index::<S, B>))
        .route("/ingest", post(handlers::ingest_form::<S, B>))
        .route("/ask", post(handlers::ask_form::<S, B>))
        .route("/api/ingest", post(handlers::api_ingest::<S, B>))
        .route("/api/ask", post(handlers::api_ask::<S, B>))
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

/// Serve the web surface until the process is stopped
pub async fn serve<S, B>(
    addr: SocketAddr,
    registry: Arc<SessionRegistry<S, B>>,
) -> std::io::Result<()>
where
    S: ContentScraper + 'static,
    B: SessionBackend + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Web form listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(registry)).await
}
