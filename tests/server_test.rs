//! HTTP surface tests driven through the router with `oneshot`.

mod common;

use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use base64::{Engine as _, engine::general_purpose};
use common::{mock_controller, sample_wav};
use serde_json::{Value, json};
use tower::ServiceExt; // for oneshot
use vibevoice_ui::config::Settings;
use vibevoice_ui::server::handlers::{GenerateResponse, InfoResponse, StatusResponse};
use vibevoice_ui::server::{routes, state::AppState};
use vibevoice_ui::session::{EMPTY_INPUT_STATUS, ErrorKind};

fn app() -> (Router, std::sync::Arc<common::Recorder>) {
    let (controller, recorder) = mock_controller(Settings::default());
    (routes::create_router(AppState::new(controller, Duration::from_secs(30)), false), recorder)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().method("POST").uri(uri).header("Content-Type", "application/json").body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    (status, to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec())
}

#[tokio::test]
async fn test_health_and_index() {
    let (app, _) = app();

    let (status, body) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "ok");

    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("VibeVoice"));
    assert!(html.contains("❌ Not Loaded"));
}

#[tokio::test]
async fn test_info_reports_settings_and_state() {
    let (app, _) = app();

    let (status, body) = get(app, "/api/info").await;
    assert_eq!(status, StatusCode::OK);
    let info: InfoResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(info.model_path, "microsoft/VibeVoice-1.5B");
    assert_eq!(info.inference_steps, 10);
    assert_eq!(info.step_range, [5, 50]);
    assert_eq!(info.provider, None);
    assert_eq!(info.guidelines.len(), 5);
    assert!(info.policy_markdown.contains("Legal Notice"));
}

#[tokio::test]
async fn test_status_preview() {
    let (app, _) = app();

    let (_, body) = post_json(app.clone(), "/api/status", json!({ "text": "" })).await;
    let response: StatusResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.status, EMPTY_INPUT_STATUS);

    let (_, body) = post_json(app, "/api/status", json!({ "text": "Hi", "has_voice": true, "steps": 20 })).await;
    let response: StatusResponse = serde_json::from_slice(&body).unwrap();
    assert!(response.status.contains("20 inference steps"));
}

#[tokio::test]
async fn test_generate_returns_audio_data_url() {
    let (app, recorder) = app();

    let (status, body) = post_json(app.clone(), "/api/generate", json!({ "text": "Hello world", "steps": 25 })).await;
    assert_eq!(status, StatusCode::OK);
    let response: GenerateResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.status, "🎵 Generated speech for: Hello world");
    assert_eq!(response.error, None);
    assert_eq!(recorder.last_steps(), 25);

    let audio = response.audio.unwrap();
    let wav = general_purpose::STANDARD.decode(audio.strip_prefix("data:audio/wav;base64,").unwrap()).unwrap();
    assert_eq!(&wav[..4], b"RIFF");

    let (_, body) = get(app, "/api/info").await;
    let info: InfoResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(info.provider, Some(vibevoice_ui::backend::ProviderKind::Local));
}

#[tokio::test]
async fn test_generate_uses_configured_steps_by_default() {
    let (app, recorder) = app();

    let (status, _) = post_json(app, "/api/generate", json!({ "text": "Hello" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recorder.last_steps(), 10);
}

#[tokio::test]
async fn test_generate_with_uploaded_voice() {
    let (app, _) = app();
    let voice = format!("data:audio/wav;base64,{}", general_purpose::STANDARD.encode(sample_wav(0.2)));

    let (status, body) = post_json(app, "/api/generate", json!({ "text": "Hello", "voice": voice })).await;
    assert_eq!(status, StatusCode::OK);
    let response: GenerateResponse = serde_json::from_slice(&body).unwrap();
    assert!(response.audio.is_some());
}

#[tokio::test]
async fn test_generate_empty_text() {
    let (app, recorder) = app();

    let (status, body) = post_json(app, "/api/generate", json!({ "text": "   " })).await;
    assert_eq!(status, StatusCode::OK);
    let response: GenerateResponse = serde_json::from_slice(&body).unwrap();
    assert!(response.audio.is_none());
    assert_eq!(response.status, EMPTY_INPUT_STATUS);
    assert_eq!(response.error, Some(ErrorKind::EmptyInput));
    assert_eq!(recorder.loads(), 0);
}

#[tokio::test]
async fn test_generate_rejects_undecodable_voice() {
    let (app, recorder) = app();

    let (status, _) = post_json(app, "/api/generate", json!({ "text": "Hello", "voice": "%%%not-base64%%%" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(recorder.loads(), 0);
}
