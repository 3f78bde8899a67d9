//! Generation session: validates requests, loads the backend on first use, and
//! maps every outcome to an (audio, status) pair for the UI.

mod controller;
mod error;

pub use controller::{GeneratedAudio, GenerationRequest, GenerationResult, SessionController};
pub use error::{EMPTY_INPUT_STATUS, ErrorKind, GenerationError, NOT_LOADED_STATUS, SYNTHESIS_FAILED_STATUS};
