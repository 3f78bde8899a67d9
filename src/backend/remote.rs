//! Provider backed by the Hugging Face model hub.

use hf_hub::api::sync::ApiBuilder;
use tracing::{info, warn};

use super::error::BackendError;
use super::local::{MANIFEST_FILE, TOKENIZER_FILE};
use super::model::LoadedBackend;
use super::provider::{ModelProvider, ProviderKind};

/// Downloads model files into the hub cache and loads them from there.
pub struct RemoteProvider {
    token: Option<String>,
    offline: bool,
}

impl RemoteProvider {
    pub fn new(token: Option<String>, offline: bool) -> Self {
        Self { token, offline }
    }

    /// Build from `HF_TOKEN` and `HF_HUB_OFFLINE`.
    pub fn from_env() -> Self {
        let token = std::env::var("HF_TOKEN").ok().filter(|t| !t.is_empty());
        let offline = std::env::var("HF_HUB_OFFLINE").map(|v| is_truthy(&v)).unwrap_or(false);
        Self::new(token, offline)
    }
}

impl ModelProvider for RemoteProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Remote
    }

    fn is_available(&self) -> bool {
        !self.offline
    }

    fn load(&self, model_id: &str) -> Result<LoadedBackend, BackendError> {
        let api = ApiBuilder::new().with_token(self.token.clone()).build()?;
        let repo = api.model(model_id.to_string());

        info!("Fetching {} from the model hub", model_id);
        let manifest = repo.get(MANIFEST_FILE)?;

        // Not every checkpoint ships a fast tokenizer
        let tokenizer = match repo.get(TOKENIZER_FILE) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("No {} for {}: {}", TOKENIZER_FILE, model_id, e);
                None
            }
        };

        LoadedBackend::from_files(model_id, ProviderKind::Remote, &manifest, tokenizer.as_deref())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
