use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use schedics::config::Config;
use schedics::server::{AppState, SharedState, router};
use schedics::source::LocalFileSource;
use std::fs;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{classic_workbook, write_fixture};

fn state(xlsx: &str) -> SharedState {
    let cfg = Config::from_yaml("public_link: x\nyear: 2025\n").unwrap();
    AppState::new(cfg, Arc::new(LocalFileSource::new(xlsx)))
}

async fn call(state: &SharedState, method: &str, uri: &str) -> (StatusCode, String, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router(state.clone()).oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn schedule_is_unavailable_before_first_refresh() {
    let xlsx = write_fixture("srv_unavailable", &classic_workbook());
    let state = state(&xlsx);

    let (status, _, _) = call(&state, "GET", "/schedule.ics").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _, body) = call(&state, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"feed_loaded\":false"));
}

#[tokio::test]
async fn refresh_then_serve_calendar_events_and_preview() {
    let xlsx = write_fixture("srv_refresh", &classic_workbook());
    let state = state(&xlsx);

    let (status, _, body) = call(&state, "POST", "/refresh").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["events"], 3);

    let (status, content_type, ics) = call(&state, "GET", "/schedule.ics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/calendar"));
    assert!(ics.contains("BEGIN:VCALENDAR"));

    let (status, _, events) = call(&state, "GET", "/events").await;
    assert_eq!(status, StatusCode::OK);
    let events: serde_json::Value = serde_json::from_str(&events).unwrap();
    assert_eq!(events.as_array().unwrap().len(), 3);

    let (status, content_type, html) = call(&state, "GET", "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert!(html.contains("Математика"));
}

#[tokio::test]
async fn failed_refresh_keeps_last_good_feed() {
    let xlsx = write_fixture("srv_keep", &classic_workbook());
    let state = state(&xlsx);

    let (status, _, _) = call(&state, "POST", "/refresh").await;
    assert_eq!(status, StatusCode::OK);
    let (_, _, before) = call(&state, "GET", "/schedule.ics").await;

    fs::remove_file(&xlsx).unwrap();
    let (status, _, body) = call(&state, "POST", "/refresh").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("\"status\":\"error\""));

    let (status, _, after) = call(&state, "GET", "/schedule.ics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before, after);
}
