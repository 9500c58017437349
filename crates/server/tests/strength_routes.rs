use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::types::RecordFormat;
use configs::AppConfig;
use serde_json::{json, Value};
use service::storage::{MemoryStore, StrengthStore};
use tower::ServiceExt;

use server::routes;
use server::startup::build_state;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app(format: RecordFormat, store: Arc<dyn StrengthStore>) -> anyhow::Result<Router> {
    let mut cfg = AppConfig::default();
    cfg.auth.secret = Some("abc".into());
    cfg.storage.format = format;
    let state = build_state(&cfg, store)?;
    Ok(routes::build_router(state, cors()))
}

async fn post(app: &Router, uri: &str, body: &'static [u8]) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let req = Request::builder().method("POST").uri(uri).body(Body::from(body))?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    Ok((status, to_bytes(resp.into_body(), usize::MAX).await?.to_vec()))
}

async fn get(app: &Router, uri: &str) -> anyhow::Result<(StatusCode, String, Vec<u8>)> {
    let req = Request::builder().uri(uri).body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Ok((status, content_type, to_bytes(resp.into_body(), usize::MAX).await?.to_vec()))
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let app = build_app(RecordFormat::Text, MemoryStore::new())?;
    let (status, _, body) = get(&app, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn get_before_write_is_404() -> anyhow::Result<()> {
    for format in [RecordFormat::Text, RecordFormat::Html, RecordFormat::Json] {
        let app = build_app(format, MemoryStore::new())?;
        let (status, _, body) = get(&app, "/daily_strength/get").await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(serde_json::from_slice::<Value>(&body)?["error"], "strength data not found");
    }
    Ok(())
}

#[tokio::test]
async fn text_round_trip() -> anyhow::Result<()> {
    let app = build_app(RecordFormat::Text, MemoryStore::new())?;
    let (status, body) = post(&app, "/update_daily_strength?auth_key=abc", b"deadlift 3x3\n").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"success");

    let (status, content_type, body) = get(&app, "/daily_strength/get").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, b"deadlift 3x3\n");
    Ok(())
}

#[tokio::test]
async fn wrong_or_missing_key_is_403() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let app = build_app(RecordFormat::Text, store.clone())?;
    for uri in [
        "/update_daily_strength?auth_key=wrong",
        "/update_daily_strength",
        "/update_daily_strength?other=abc",
    ] {
        let (status, _) = post(&app, uri, b"payload").await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        let (status, _) = post(&app, uri, b"").await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
    }
    assert!(store.load().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn empty_text_is_400_and_keeps_record() -> anyhow::Result<()> {
    let app = build_app(RecordFormat::Text, MemoryStore::new())?;
    post(&app, "/update_daily_strength?auth_key=abc", b"keep me").await?;
    let (status, _) = post(&app, "/update_daily_strength?auth_key=abc", b"").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, _, body) = get(&app, "/daily_strength/get").await?;
    assert_eq!(body, b"keep me");
    Ok(())
}

#[tokio::test]
async fn html_scenario() -> anyhow::Result<()> {
    let app = build_app(RecordFormat::Html, MemoryStore::new())?;
    let (status, body) = post(&app, "/update_daily_strength?auth_key=abc", b"Title\nA,B\n1,2").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"success");

    let (status, content_type, body) = get(&app, "/daily_strength/get").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    let html = String::from_utf8(body)?;
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<tr><th>A</th><th>B</th></tr>"));
    assert!(html.contains("<tr><td>1</td><td>2</td></tr>"));
    Ok(())
}

#[tokio::test]
async fn html_title_only_shows_placeholder() -> anyhow::Result<()> {
    let app = build_app(RecordFormat::Html, MemoryStore::with_record("Rest day"))?;
    let (status, _, body) = get(&app, "/daily_strength/get").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body)?.contains("No data available"));
    Ok(())
}

#[tokio::test]
async fn html_missing_title_is_500() -> anyhow::Result<()> {
    let app = build_app(RecordFormat::Html, MemoryStore::with_record("\n\n"))?;
    let (status, _, _) = get(&app, "/daily_strength/get").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn json_scenario() -> anyhow::Result<()> {
    let app = build_app(RecordFormat::Json, MemoryStore::new())?;
    let (status, body) = post(&app, "/update_daily_strength?auth_key=abc", br#"{"x":1}"#).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!({"status": "success"}));

    let (status, content_type, body) = get(&app, "/daily_strength/get").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("application/json"));
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!({"x": 1}));
    Ok(())
}

#[tokio::test]
async fn invalid_json_is_400_and_keeps_record() -> anyhow::Result<()> {
    let app = build_app(RecordFormat::Json, MemoryStore::new())?;
    post(&app, "/update_daily_strength?auth_key=abc", br#"{"x":1}"#).await?;
    let (status, _) = post(&app, "/update_daily_strength?auth_key=abc", b"{not json").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, _, body) = get(&app, "/daily_strength/get").await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!({"x": 1}));
    Ok(())
}

#[tokio::test]
async fn corrupt_stored_json_is_500() -> anyhow::Result<()> {
    let app = build_app(RecordFormat::Json, MemoryStore::with_record("{]"))?;
    let (status, _, _) = get(&app, "/daily_strength/get").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn repeated_auth_key_uses_first_value() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let app = build_app(RecordFormat::Json, store.clone())?;

    let (status, body) = post(&app, "/update_daily_strength?auth_key=wrong&auth_key=wrong", b"payload").await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(serde_json::from_slice::<Value>(&body)?["error"], "invalid auth key");
    let (status, _) = post(&app, "/update_daily_strength?auth_key=zzz&auth_key=abc", br#"{"x":1}"#).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(store.load().await?.is_none());

    let (status, body) = post(&app, "/update_daily_strength?auth_key=abc&auth_key=zzz", br#"{"x":1}"#).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!({"status": "success"}));
    Ok(())
}

#[tokio::test]
async fn json_null_is_400() -> anyhow::Result<()> {
    let app = build_app(RecordFormat::Json, MemoryStore::new())?;
    let (status, _) = post(&app, "/update_daily_strength?auth_key=abc", b"null").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _, _) = get(&app, "/daily_strength/get").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
