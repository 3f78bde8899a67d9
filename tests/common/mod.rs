//! Mock providers and models shared by the integration tests.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use vibevoice_ui::backend::{BackendError, BackendHandle, LoadedBackend, ModelProvider, ProviderChain, ProviderKind, SpeechModel, SynthesisInput, TextTokenizer};
use vibevoice_ui::config::Settings;
use vibevoice_ui::session::SessionController;

pub const MOCK_SAMPLE_RATE: u32 = 16_000;

/// Detail carried by [`ModelBehavior::Fail`]; must never reach a status line.
pub const FAILURE_DETAIL: &str = "decoder diverged at diffusion step 7";

/// Word-level vocabulary: "[UNK]" = 0, "hello" = 1, "world" = 2.
pub const WORD_LEVEL_TOKENIZER: &str = r#"{
    "version": "1.0",
    "truncation": null,
    "padding": null,
    "added_tokens": [],
    "normalizer": null,
    "pre_tokenizer": { "type": "Whitespace" },
    "post_processor": null,
    "decoder": null,
    "model": { "type": "WordLevel", "vocab": { "[UNK]": 0, "hello": 1, "world": 2 }, "unk_token": "[UNK]" }
}"#;

/// How the mock model responds to a synthesis call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelBehavior {
    Succeed,
    Sleep(Duration),
    Panic,
    Fail,
}

/// Shared observations from a [`MockProvider`] and the models it loads.
#[derive(Default)]
pub struct Recorder {
    pub loads: AtomicUsize,
    pub fail_loads: AtomicBool,
    pub last_steps: AtomicU32,
    pub last_voice_samples: AtomicUsize,
    pub last_text: parking_lot::Mutex<String>,
    pub last_token_ids: parking_lot::Mutex<Option<Vec<u32>>>,
}

impl Recorder {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn last_steps(&self) -> u32 {
        self.last_steps.load(Ordering::SeqCst)
    }
}

/// Records every synthesis call, then behaves as configured. Success is a fixed 0.25 s buffer.
struct RecordingModel {
    recorder: Arc<Recorder>,
    behavior: ModelBehavior,
}

impl SpeechModel for RecordingModel {
    fn sample_rate(&self) -> u32 {
        MOCK_SAMPLE_RATE
    }

    fn synthesize(&self, input: &SynthesisInput<'_>) -> Result<Vec<f32>, BackendError> {
        self.recorder.last_steps.store(input.steps, Ordering::SeqCst);
        self.recorder.last_voice_samples.store(input.voice.map(|v| v.samples.len()).unwrap_or(0), Ordering::SeqCst);
        *self.recorder.last_text.lock() = input.text.to_string();
        *self.recorder.last_token_ids.lock() = input.token_ids.map(|ids| ids.to_vec());

        match self.behavior {
            ModelBehavior::Succeed => {}
            ModelBehavior::Sleep(delay) => std::thread::sleep(delay),
            ModelBehavior::Panic => panic!("synthesis kernel crashed"),
            ModelBehavior::Fail => return Err(BackendError::Synthesis(FAILURE_DETAIL.to_string())),
        }
        Ok(vec![0.1; MOCK_SAMPLE_RATE as usize / 4])
    }
}

pub struct MockProvider {
    recorder: Arc<Recorder>,
    behavior: ModelBehavior,
    with_tokenizer: bool,
}

impl ModelProvider for MockProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Local
    }

    fn is_available(&self) -> bool {
        true
    }

    fn load(&self, model_id: &str) -> Result<LoadedBackend, BackendError> {
        self.recorder.loads.fetch_add(1, Ordering::SeqCst);
        if self.recorder.fail_loads.load(Ordering::SeqCst) {
            return Err(BackendError::ModelNotFound { model_id: model_id.to_string(), searched: "mock".to_string() });
        }
        let model: Box<dyn SpeechModel> = Box::new(RecordingModel { recorder: self.recorder.clone(), behavior: self.behavior });
        let tokenizer = if self.with_tokenizer {
            let tokenizer = tokenizers::Tokenizer::from_str(WORD_LEVEL_TOKENIZER).map_err(|e| BackendError::Tokenizer(e.to_string()))?;
            let tokenizer: Box<dyn TextTokenizer> = Box::new(tokenizer);
            Some(tokenizer)
        } else {
            None
        };
        Ok(LoadedBackend::new(model_id, ProviderKind::Local, model, tokenizer))
    }
}

/// A controller over a single succeeding mock provider, plus the recorder watching it.
pub fn mock_controller(settings: Settings) -> (Arc<SessionController>, Arc<Recorder>) {
    mock_controller_with(settings, ModelBehavior::Succeed, false)
}

/// A controller whose model behaves as given, optionally with a word-level tokenizer.
pub fn mock_controller_with(settings: Settings, behavior: ModelBehavior, with_tokenizer: bool) -> (Arc<SessionController>, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let provider: Box<dyn ModelProvider> = Box::new(MockProvider { recorder: recorder.clone(), behavior, with_tokenizer });
    let backend = BackendHandle::new(ProviderChain::detect(vec![provider]), settings.model_path.clone());
    (Arc::new(SessionController::new(Arc::new(settings), backend)), recorder)
}

/// Write a short mono 16-bit WAV and return its bytes.
pub fn sample_wav(seconds: f32) -> Vec<u8> {
    let samples: Vec<f32> = (0..(MOCK_SAMPLE_RATE as f32 * seconds) as usize).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();
    vibevoice_ui::audio::encode_wav(&samples, MOCK_SAMPLE_RATE).unwrap()
}
