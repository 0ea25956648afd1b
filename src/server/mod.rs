//! HTTP surface: the calendar feed, a JSON event list, an HTML preview and a
//! refresh trigger.
//!
//! Endpoints:
//! - GET  /schedule.ics - current feed (503 until the first successful refresh)
//! - POST /refresh      - rebuild the feed; the previous one is kept on failure
//! - GET  /events       - JSON list of the current events
//! - GET  /             - HTML preview
//! - GET  /health       - liveness and feed status

mod handlers;

use crate::config::Config;
use crate::core::cache::FeedCache;
use crate::core::feed::{Feed, fetch_feed};
use crate::errors::{AppError, AppResult};
use crate::source::WorkbookSource;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// State shared by all handlers.
pub struct AppState {
    pub cfg: Config,
    pub source: Arc<dyn WorkbookSource>,
    pub cache: FeedCache,
    refresh_lock: Mutex<()>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(cfg: Config, source: Arc<dyn WorkbookSource>) -> SharedState {
        Arc::new(Self {
            cfg,
            source,
            cache: FeedCache::new(),
            refresh_lock: Mutex::new(()),
        })
    }
}

/// Rebuild the feed on a blocking thread. Concurrent calls are serialized so
/// only one retrieval runs at a time.
pub async fn refresh(state: &SharedState) -> AppResult<Arc<Feed>> {
    let _guard = state.refresh_lock.lock().await;

    let worker = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        worker
            .cache
            .refresh(|| fetch_feed(worker.source.as_ref(), &worker.cfg))
    })
    .await
    .map_err(|e| AppError::Other(format!("refresh task failed: {e}")))?
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::preview_handler))
        .route("/schedule.ics", get(handlers::schedule_handler))
        .route("/events", get(handlers::events_handler))
        .route("/refresh", post(handlers::refresh_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(state)
}

/// Load the feed once, then serve until the process is stopped. A failed
/// initial load is logged; the server still starts.
pub async fn serve(state: SharedState, bind: &str) -> AppResult<()> {
    match refresh(&state).await {
        Ok(feed) => log::info!("Initial feed ready: {} events", feed.len()),
        Err(e) => log::error!("Initial refresh failed: {e}"),
    }

    let listener = tokio::net::TcpListener::bind(bind).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
