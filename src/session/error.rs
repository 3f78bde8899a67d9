//! Generation failures and the status strings shown for them.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::BackendError;

/// Status shown when a blank request is submitted.
pub const EMPTY_INPUT_STATUS: &str = "⚠️ Please enter some text to generate speech";

/// Status shown when the backend could not be loaded.
pub const NOT_LOADED_STATUS: &str = "❌ Model not loaded. Please try again.";

/// Status shown for any tokenization or synthesis failure.
pub const SYNTHESIS_FAILED_STATUS: &str = "❌ Generation error: speech could not be generated. Please try again.";

/// Tag carried by every failed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    BackendLoadFailure,
    SynthesisFailure,
    BackendTimeout,
}

/// Why a generation request produced no audio.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("model not loaded: {0}")]
    BackendLoadFailure(#[source] BackendError),

    #[error("speech synthesis failed: {0}")]
    SynthesisFailure(String),

    #[error("generation timed out after {0:?}")]
    BackendTimeout(Duration),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::EmptyInput => ErrorKind::EmptyInput,
            GenerationError::BackendLoadFailure(_) => ErrorKind::BackendLoadFailure,
            GenerationError::SynthesisFailure(_) => ErrorKind::SynthesisFailure,
            GenerationError::BackendTimeout(_) => ErrorKind::BackendTimeout,
        }
    }

    /// User-facing status. Failure details stay in the logs.
    pub fn status_message(&self) -> String {
        match self {
            GenerationError::EmptyInput => EMPTY_INPUT_STATUS.to_string(),
            GenerationError::BackendLoadFailure(_) => NOT_LOADED_STATUS.to_string(),
            GenerationError::SynthesisFailure(_) => SYNTHESIS_FAILED_STATUS.to_string(),
            GenerationError::BackendTimeout(limit) => format!("❌ Generation timed out after {:?}. Please try again.", limit),
        }
    }
}
