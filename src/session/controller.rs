//! Session controller: one generation request from UI input to audio buffer.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};

use regex::Regex;
use tracing::{debug, error, info, warn};

use super::error::{EMPTY_INPUT_STATUS, ErrorKind, GenerationError};
use crate::audio::{self, VoiceReference};
use crate::backend::{BackendHandle, BackendState, ProviderKind, SynthesisInput};
use crate::config::{STEP_RANGE, Settings};

/// Runs of whitespace collapsed before tokenization.
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Characters of the input echoed into the log line for a request.
const LOG_PREVIEW_CHARS: usize = 50;

/// Input for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub text: String,
    pub voice_ref: Option<PathBuf>,
    pub steps: u32,
}

impl GenerationRequest {
    pub fn new(text: impl Into<String>, steps: u32) -> Self {
        Self { text: text.into(), voice_ref: None, steps }
    }

    pub fn with_voice(mut self, path: impl Into<PathBuf>) -> Self {
        self.voice_ref = Some(path.into());
        self
    }
}

/// Encoded audio produced by a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedAudio {
    /// 16-bit PCM mono WAV file bytes.
    pub wav: Vec<u8>,
    pub sample_rate: u32,
    pub duration_secs: f32,
    pub provider: ProviderKind,
}

/// Outcome handed back to the presentation surface: audio or none, plus a status line.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub audio: Option<GeneratedAudio>,
    pub status: String,
    pub error: Option<ErrorKind>,
}

impl GenerationResult {
    fn success(audio: GeneratedAudio, text: &str) -> Self {
        Self { audio: Some(audio), status: format!("🎵 Generated speech for: {}", text), error: None }
    }

    fn failure(err: &GenerationError) -> Self {
        Self { audio: None, status: err.status_message(), error: Some(err.kind()) }
    }

    fn from_outcome(text: &str, outcome: Result<GeneratedAudio, GenerationError>) -> Self {
        match outcome {
            Ok(audio) => Self::success(audio, text.trim()),
            Err(e) => Self::failure(&e),
        }
    }

    pub fn is_success(&self) -> bool {
        self.audio.is_some()
    }
}

/// Mediates between the UI and the speech backend.
///
/// Owns the backend handle; the settings are shared read-only.
pub struct SessionController {
    settings: Arc<Settings>,
    backend: BackendHandle,
}

impl SessionController {
    /// Create a controller. The backend is not loaded until the first non-empty request.
    pub fn new(settings: Arc<Settings>, backend: BackendHandle) -> Self {
        info!("🚀 Initializing VibeVoice session controller for {}", backend.model_id());
        Self { settings, backend }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> &BackendHandle {
        &self.backend
    }

    pub fn backend_state(&self) -> BackendState {
        self.backend.state()
    }

    /// Generate speech for `text`.
    ///
    /// # Arguments
    /// * `text` - Text to speak; blank text never touches the backend
    /// * `voice_ref` - Optional reference voice WAV file
    /// * `steps` - Inference steps, passed to synthesis unchanged
    ///
    /// # Returns
    /// Audio plus a success status, or no audio plus an error status.
    pub fn generate(&self, text: &str, voice_ref: Option<&Path>, steps: u32) -> GenerationResult {
        GenerationResult::from_outcome(text, self.try_generate(text, voice_ref, steps))
    }

    /// Generate speech, returning the typed failure instead of a status line.
    ///
    /// # Errors
    /// - [`GenerationError::EmptyInput`] for blank text
    /// - [`GenerationError::BackendLoadFailure`] if no provider could load the model
    /// - [`GenerationError::SynthesisFailure`] for voice, tokenizer, synthesis, or encoding errors
    pub fn try_generate(&self, text: &str, voice_ref: Option<&Path>, steps: u32) -> Result<GeneratedAudio, GenerationError> {
        let text = validate_text(text)?;

        if !STEP_RANGE.contains(&steps) {
            warn!("Inference steps {} outside {}-{}, passing through unchanged", steps, STEP_RANGE.start(), STEP_RANGE.end());
        }

        let backend = self.backend.try_ensure_loaded().map_err(GenerationError::BackendLoadFailure)?;

        info!("🎵 Generating speech for: {}...", text.chars().take(LOG_PREVIEW_CHARS).collect::<String>());
        let started = Instant::now();

        let voice = voice_ref.map(load_voice).transpose()?;

        let normalized = WHITESPACE.replace_all(text, " ");
        let token_ids = match &backend.tokenizer {
            Some(tokenizer) => Some(tokenizer.encode(&normalized).map_err(|e| synthesis_failure("Tokenization", e))?),
            None => {
                debug!("No tokenizer loaded, synthesizing without token ids");
                None
            }
        };

        let input = SynthesisInput { text: &normalized, token_ids: token_ids.as_deref(), voice: voice.as_ref(), steps };
        let samples = backend.model.synthesize(&input).map_err(|e| synthesis_failure("Speech generation", e))?;

        let sample_rate = backend.model.sample_rate();
        let wav = audio::encode_wav(&samples, sample_rate).map_err(|e| synthesis_failure("Audio encoding", e))?;
        let duration_secs = audio::util::duration_secs(samples.len(), sample_rate);

        info!("✅ Speech generation completed ({:.1}s of audio in {:.2?})", duration_secs, started.elapsed());
        Ok(GeneratedAudio { wav, sample_rate, duration_secs, provider: backend.provider })
    }

    /// Generate on the blocking pool, giving up after `limit`.
    ///
    /// A timed-out synthesis keeps running in the background; its result is discarded.
    pub async fn generate_with_timeout(self: &Arc<Self>, request: GenerationRequest, limit: Duration) -> GenerationResult {
        if let Err(e) = validate_text(&request.text) {
            return GenerationResult::failure(&e);
        }

        let controller = Arc::clone(self);
        let text = request.text.clone();
        let task = tokio::task::spawn_blocking(move || controller.try_generate(&request.text, request.voice_ref.as_deref(), request.steps));

        let outcome = match tokio::time::timeout(limit, task).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_err)) => {
                error!("❌ Generation task aborted: {}", join_err);
                Err(GenerationError::SynthesisFailure(join_err.to_string()))
            }
            Err(_) => {
                error!("❌ Generation timed out after {:?}", limit);
                Err(GenerationError::BackendTimeout(limit))
            }
        };

        GenerationResult::from_outcome(&text, outcome)
    }

    /// Status hint for the current form contents, shown before generating.
    pub fn preview_status(&self, text: &str, has_voice: bool, steps: u32) -> String {
        if text.trim().is_empty() {
            EMPTY_INPUT_STATUS.to_string()
        } else if !has_voice {
            "ℹ️ No reference voice provided - using default voice".to_string()
        } else {
            format!("✅ Ready to generate speech with {} inference steps", steps)
        }
    }

    /// Release the backend.
    pub fn shutdown(&self) {
        self.backend.shutdown();
    }
}

/// Trimmed text, or [`GenerationError::EmptyInput`] when blank.
fn validate_text(text: &str) -> Result<&str, GenerationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        warn!("⚠️ Empty generation request ignored");
        return Err(GenerationError::EmptyInput);
    }
    Ok(trimmed)
}

fn load_voice(path: &Path) -> Result<VoiceReference, GenerationError> {
    let voice = audio::read_voice_reference(path).map_err(|e| synthesis_failure(&format!("Reading reference voice {}", path.display()), e))?;
    info!("🎤 Using reference voice {} ({:.1}s)", path.display(), voice.duration_secs());
    Ok(voice)
}

fn synthesis_failure(stage: &str, e: impl std::fmt::Display) -> GenerationError {
    error!("❌ {} failed: {}", stage, e);
    GenerationError::SynthesisFailure(format!("{}: {}", stage, e))
}
