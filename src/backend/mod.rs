//! Speech backend: model/tokenizer loading behind a pluggable provider chain.
//!
//! Providers are tried in a fixed order (local package checkout, then the
//! remote model hub); callers only see whether a backend is loaded.

mod error;
mod handle;
mod local;
mod model;
mod provider;
mod remote;

pub use error::BackendError;
pub use handle::{BackendHandle, BackendState};
pub use local::{LocalProvider, MANIFEST_FILE, TOKENIZER_FILE};
pub use model::{DEFAULT_SAMPLE_RATE, LoadedBackend, ModelManifest, PreviewModel, SpeechModel, SynthesisInput, TextTokenizer};
pub use provider::{ModelProvider, ProviderChain, ProviderKind};
pub use remote::RemoteProvider;
