//! Loaded speech model and tokenizer.

use std::f32::consts::PI;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::error::BackendError;
use super::provider::ProviderKind;
use crate::audio::VoiceReference;

/// Sample rate used when the model manifest does not declare one.
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// Length of the preview rendering in seconds.
const PREVIEW_DURATION_SECS: f32 = 3.0;

/// Pitch of the preview tone.
const PREVIEW_FREQUENCY_HZ: f32 = 440.0;

/// Everything the synthesis call needs for one request.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub text: &'a str,
    /// Token ids, or `None` when no tokenizer was loaded.
    pub token_ids: Option<&'a [u32]>,
    pub voice: Option<&'a VoiceReference>,
    /// Sampling granularity: more steps trade latency for quality.
    pub steps: u32,
}

/// A speech model able to turn text into mono f32 samples.
pub trait SpeechModel: Send + Sync {
    /// Output sample rate in Hz.
    fn sample_rate(&self) -> u32;

    /// Synthesize audio for one request.
    ///
    /// # Errors
    /// Returns [`BackendError::Synthesis`] if generation fails.
    fn synthesize(&self, input: &SynthesisInput<'_>) -> Result<Vec<f32>, BackendError>;
}

/// Text tokenizer paired with a speech model.
pub trait TextTokenizer: Send + Sync {
    /// Encode `text` into token ids.
    ///
    /// # Errors
    /// Returns [`BackendError::Tokenizer`] if encoding fails.
    fn encode(&self, text: &str) -> Result<Vec<u32>, BackendError>;
}

impl TextTokenizer for tokenizers::Tokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>, BackendError> {
        // The inherent encode lives on the TokenizerImpl behind Deref
        let encoding = (**self).encode(text, true).map_err(|e| BackendError::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }
}

/// The subset of a model's `config.json` the UI relies on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelManifest {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default, alias = "sample_rate")]
    pub sampling_rate: Option<u32>,
}

impl ModelManifest {
    /// Parse a manifest file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn from_file(path: &Path) -> Result<Self, BackendError> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|source| BackendError::Manifest { path: path.to_path_buf(), source })
    }

    /// Declared sample rate, or [`DEFAULT_SAMPLE_RATE`].
    pub fn sample_rate(&self) -> u32 {
        self.sampling_rate.filter(|r| *r > 0).unwrap_or(DEFAULT_SAMPLE_RATE)
    }
}

/// Preview renderer standing in for neural inference.
///
/// Produces a decaying 440 Hz tone so the full request path (tokenize,
/// synthesize, encode, play back) can be exercised without model weights.
pub struct PreviewModel {
    sample_rate: u32,
    model_type: String,
}

impl PreviewModel {
    pub fn new(manifest: &ModelManifest) -> Self {
        Self { sample_rate: manifest.sample_rate(), model_type: manifest.model_type.clone().unwrap_or_else(|| "unknown".to_string()) }
    }
}

impl SpeechModel for PreviewModel {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn synthesize(&self, input: &SynthesisInput<'_>) -> Result<Vec<f32>, BackendError> {
        debug!(
            "Preview synthesis ({}): {} chars, {} tokens, {} steps, voice: {}",
            self.model_type,
            input.text.len(),
            input.token_ids.map_or(0, |ids| ids.len()),
            input.steps,
            input.voice.map_or("default".to_string(), |v| format!("{:.1}s clip", v.duration_secs()))
        );

        let total = (self.sample_rate as f32 * PREVIEW_DURATION_SECS) as usize;
        if total < 2 {
            return Err(BackendError::Synthesis(format!("sample rate {} too low", self.sample_rate)));
        }

        // Endpoint-inclusive time axis over the preview duration
        let step = PREVIEW_DURATION_SECS / (total - 1) as f32;
        let samples = (0..total)
            .map(|i| {
                let t = i as f32 * step;
                (2.0 * PI * PREVIEW_FREQUENCY_HZ * t).sin() * (-t / 2.0).exp()
            })
            .collect();

        Ok(samples)
    }
}

/// A loaded model/tokenizer pair and the provider that produced it.
pub struct LoadedBackend {
    pub model_id: String,
    pub provider: ProviderKind,
    pub model: Box<dyn SpeechModel>,
    pub tokenizer: Option<Box<dyn TextTokenizer>>,
}

impl fmt::Debug for LoadedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedBackend")
            .field("model_id", &self.model_id)
            .field("provider", &self.provider)
            .field("sample_rate", &self.model.sample_rate())
            .field("has_tokenizer", &self.tokenizer.is_some())
            .finish()
    }
}

impl LoadedBackend {
    pub fn new(model_id: impl Into<String>, provider: ProviderKind, model: Box<dyn SpeechModel>, tokenizer: Option<Box<dyn TextTokenizer>>) -> Self {
        Self { model_id: model_id.into(), provider, model, tokenizer }
    }

    /// Build a backend from a model manifest and an optional `tokenizer.json`.
    ///
    /// # Arguments
    /// * `model_id` - Identifier the backend was requested under
    /// * `provider` - Provider that located the files
    /// * `manifest_path` - Path to the model's `config.json`
    /// * `tokenizer_path` - Path to `tokenizer.json`, if the model ships one
    ///
    /// # Errors
    /// Returns an error if the manifest is unreadable or the tokenizer file is corrupt.
    pub fn from_files(model_id: &str, provider: ProviderKind, manifest_path: &Path, tokenizer_path: Option<&Path>) -> Result<Self, BackendError> {
        let manifest = ModelManifest::from_file(manifest_path)?;

        let tokenizer: Option<Box<dyn TextTokenizer>> = match tokenizer_path {
            Some(path) => {
                let tokenizer: Box<dyn TextTokenizer> =
                    Box::new(tokenizers::Tokenizer::from_file(path).map_err(|e| BackendError::Tokenizer(format!("{}: {}", path.display(), e)))?);
                info!("Tokenizer loaded from {}", path.display());
                Some(tokenizer)
            }
            None => {
                info!("No tokenizer shipped with {}, continuing without one", model_id);
                None
            }
        };

        info!("Model sample rate: {} Hz", manifest.sample_rate());
        Ok(Self::new(model_id, provider, Box::new(PreviewModel::new(&manifest)), tokenizer))
    }
}
