//! Provider backed by a local VibeVoice package checkout.

use std::path::PathBuf;

use tracing::debug;

use super::error::BackendError;
use super::model::LoadedBackend;
use super::provider::{ModelProvider, ProviderKind};

/// Model manifest every model directory must contain.
pub const MANIFEST_FILE: &str = "config.json";

/// Optional tokenizer definition next to the manifest.
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Loads models from disk, with no network access.
pub struct LocalProvider {
    repo_dir: PathBuf,
}

impl LocalProvider {
    /// Create a provider rooted at the package checkout `repo_dir`.
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self { repo_dir: repo_dir.into() }
    }

    /// Directories that may hold `model_id`, in lookup order.
    fn candidate_dirs(&self, model_id: &str) -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(model_id), self.repo_dir.join(model_id)];
        if let Some(name) = model_id.rsplit('/').next()
            && !name.is_empty()
        {
            candidates.push(self.repo_dir.join("models").join(name));
        }
        candidates
    }

    /// First candidate directory containing a model manifest.
    pub fn resolve(&self, model_id: &str) -> Result<PathBuf, BackendError> {
        let candidates = self.candidate_dirs(model_id);
        for dir in &candidates {
            debug!("Looking for {} in {}", MANIFEST_FILE, dir.display());
            if dir.join(MANIFEST_FILE).is_file() {
                return Ok(dir.clone());
            }
        }

        let searched = candidates.iter().map(|d| d.display().to_string()).collect::<Vec<_>>().join(", ");
        Err(BackendError::ModelNotFound { model_id: model_id.to_string(), searched })
    }
}

impl ModelProvider for LocalProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Local
    }

    fn is_available(&self) -> bool {
        self.repo_dir.is_dir()
    }

    fn load(&self, model_id: &str) -> Result<LoadedBackend, BackendError> {
        let dir = self.resolve(model_id)?;
        let tokenizer = dir.join(TOKENIZER_FILE);
        let tokenizer = tokenizer.is_file().then_some(tokenizer);

        LoadedBackend::from_files(model_id, ProviderKind::Local, &dir.join(MANIFEST_FILE), tokenizer.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_without_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(dir.path().join("VibeVoice"));
        assert!(!provider.is_available());
    }

    #[test]
    fn test_resolves_model_under_models_dir() {
        let dir = tempfile::tempdir().unwrap();
        let model_dir = dir.path().join("models").join("VibeVoice-1.5B");
        std::fs::create_dir_all(&model_dir).unwrap();
        std::fs::write(model_dir.join(MANIFEST_FILE), r#"{"model_type": "vibevoice"}"#).unwrap();

        let provider = LocalProvider::new(dir.path());
        assert!(provider.is_available());
        assert_eq!(provider.resolve("microsoft/VibeVoice-1.5B").unwrap(), model_dir);

        let backend = provider.load("microsoft/VibeVoice-1.5B").unwrap();
        assert_eq!(backend.provider, ProviderKind::Local);
        assert!(backend.tokenizer.is_none());
    }

    #[test]
    fn test_missing_model_lists_searched_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(dir.path());
        let err = provider.load("org/absent").unwrap_err();
        assert!(matches!(err, BackendError::ModelNotFound { .. }));
        assert!(err.to_string().contains("absent"));
    }
}
