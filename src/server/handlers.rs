use std::io::Write;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::backend::{BackendState, ProviderKind};
use crate::config::STEP_RANGE;
use crate::server::page;
use crate::server::state::AppState;
use crate::session::{ErrorKind, GenerationRequest};

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "ok".to_string() })
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(state.controller.settings(), state.controller.backend_state()))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InfoResponse {
    pub model_path: String,
    pub inference_steps: u32,
    pub step_range: [u32; 2],
    pub backend_state: BackendState,
    pub provider: Option<ProviderKind>,
    pub providers: Vec<ProviderKind>,
    pub disclaimer: String,
    pub guidelines: Vec<String>,
    /// Full policy text, including the legal notice, as markdown.
    pub policy_markdown: String,
}

pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    let controller = &state.controller;
    let settings = controller.settings();
    Json(InfoResponse {
        model_path: settings.model_path.clone(),
        inference_steps: settings.inference_steps,
        step_range: [*STEP_RANGE.start(), *STEP_RANGE.end()],
        backend_state: controller.backend_state(),
        provider: controller.backend().provider(),
        providers: controller.backend().chain().kinds(),
        disclaimer: settings.usage_guidelines.disclaimer.clone(),
        guidelines: settings.usage_guidelines.guidelines.clone(),
        policy_markdown: settings.usage_guidelines.render_markdown(),
    })
}

#[derive(Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    has_voice: bool,
    steps: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

pub async fn status(State(state): State<AppState>, Json(payload): Json<StatusRequest>) -> Json<StatusResponse> {
    let steps = payload.steps.unwrap_or(state.controller.settings().inference_steps);
    Json(StatusResponse { status: state.controller.preview_status(&payload.text, payload.has_voice, steps) })
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    text: String,
    /// Reference voice as base64 WAV, optionally a `data:` URL.
    voice: Option<String>,
    steps: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// `data:audio/wav;base64,...` when generation succeeded.
    pub audio: Option<String>,
    pub status: String,
    pub error: Option<ErrorKind>,
    pub sample_rate: Option<u32>,
    pub duration_secs: Option<f32>,
}

pub async fn generate(State(state): State<AppState>, Json(payload): Json<GenerateRequest>) -> Response {
    let steps = payload.steps.unwrap_or(state.controller.settings().inference_steps);

    // Held until the request finishes; the file is removed on drop
    let voice_file = match payload.voice.as_deref().filter(|v| !v.trim().is_empty()) {
        Some(encoded) => match spool_voice(encoded) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("⚠️ Rejected reference voice upload: {}", e);
                let body = GenerateResponse { status: "⚠️ Reference voice upload could not be decoded".to_string(), ..Default::default() };
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
        },
        None => None,
    };

    let mut request = GenerationRequest::new(payload.text, steps);
    if let Some(file) = &voice_file {
        request = request.with_voice(file.path());
    }

    let result = state.controller.generate_with_timeout(request, state.generation_timeout).await;
    drop(voice_file);

    let body = match result.audio {
        Some(audio) => GenerateResponse {
            audio: Some(format!("data:audio/wav;base64,{}", general_purpose::STANDARD.encode(&audio.wav))),
            status: result.status,
            error: None,
            sample_rate: Some(audio.sample_rate),
            duration_secs: Some(audio.duration_secs),
        },
        None => GenerateResponse { status: result.status, error: result.error, ..Default::default() },
    };

    (StatusCode::OK, Json(body)).into_response()
}

/// Decode a base64 upload into a temporary WAV file.
fn spool_voice(encoded: &str) -> anyhow::Result<NamedTempFile> {
    // Strip "data:audio/wav;base64," if present
    let b64 = if encoded.starts_with("data:") { encoded.split_once(',').map(|(_, data)| data).unwrap_or(encoded) } else { encoded };

    let bytes = general_purpose::STANDARD.decode(b64.trim())?;
    let mut file = tempfile::Builder::new().prefix("voice-ref-").suffix(".wav").tempfile()?;
    file.write_all(&bytes)?;
    file.flush()?;

    debug!("Spooled {} byte reference voice to {}", bytes.len(), file.path().display());
    Ok(file)
}
