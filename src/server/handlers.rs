use super::{SharedState, refresh};
use crate::export::preview::render_preview;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

fn not_ready() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"status": "error", "error": "feed not loaded yet"})),
    )
        .into_response()
}

pub async fn schedule_handler(State(state): State<SharedState>) -> Response {
    match state.cache.current() {
        Some(feed) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, CALENDAR_CONTENT_TYPE)],
            feed.ics.clone(),
        )
            .into_response(),
        None => not_ready(),
    }
}

pub async fn events_handler(State(state): State<SharedState>) -> Response {
    match state.cache.current() {
        Some(feed) => Json(feed.to_json_view(&state.cfg.highlight_color)).into_response(),
        None => not_ready(),
    }
}

pub async fn preview_handler(State(state): State<SharedState>) -> Html<String> {
    let events = state
        .cache
        .current()
        .map(|feed| feed.events.clone())
        .unwrap_or_default();
    Html(render_preview("Schedule", &events, &state.cfg.highlight_color))
}

pub async fn refresh_handler(State(state): State<SharedState>) -> Response {
    match refresh(&state).await {
        Ok(feed) => Json(json!({"status": "ok", "events": feed.len()})).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({"status": "error", "error": e.to_string()})),
        )
            .into_response(),
    }
}

pub async fn health_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let feed = state.cache.current();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "feed_loaded": feed.is_some(),
        "events": feed.map(|f| f.len()).unwrap_or(0),
    }))
}
