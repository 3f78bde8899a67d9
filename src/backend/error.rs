//! Error types for model loading and inference.

use std::path::PathBuf;

use thiserror::Error;

use super::provider::ProviderKind;

/// Failure raised by a provider, tokenizer, or speech model.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no model provider is available")]
    NoProvider,

    #[error("model '{model_id}' not found (searched: {searched})")]
    ModelNotFound { model_id: String, searched: String },

    #[error("model hub error: {0}")]
    Hub(String),

    #[error("invalid model manifest {path}: {source}")]
    Manifest { path: PathBuf, source: serde_json::Error },

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("synthesis error: {0}")]
    Synthesis(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("all providers failed: {}", format_attempts(.0))]
    Exhausted(Vec<(ProviderKind, String)>),
}

fn format_attempts(attempts: &[(ProviderKind, String)]) -> String {
    attempts.iter().map(|(kind, reason)| format!("{}: {}", kind, reason)).collect::<Vec<_>>().join("; ")
}

impl From<hf_hub::api::sync::ApiError> for BackendError {
    fn from(e: hf_hub::api::sync::ApiError) -> Self {
        BackendError::Hub(e.to_string())
    }
}
