//! Process-wide backend slot with serialized lazy loading.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::error::BackendError;
use super::local::LocalProvider;
use super::model::LoadedBackend;
use super::provider::{ModelProvider, ProviderChain, ProviderKind};
use super::remote::RemoteProvider;

/// Load state of the backend.
///
/// `Unloaded -> Loading -> Loaded` on success; a failed load returns to
/// `Unloaded` so the next request retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendState {
    Unloaded,
    Loading,
    Loaded,
}

/// Owner of the loaded model and tokenizer.
///
/// Concurrent first-time loads are serialized by `load_gate`; once loaded,
/// readers only take the shared side of `slot`.
pub struct BackendHandle {
    chain: ProviderChain,                     // Providers, fixed at construction
    model_id: String,                         // Identifier to load
    slot: RwLock<Option<Arc<LoadedBackend>>>, // Loaded backend, if any
    load_gate: Mutex<()>,                     // Serializes load attempts
    loading: AtomicBool,                      // A load is in progress
}

impl BackendHandle {
    /// Create an empty handle. Nothing is loaded until first use.
    pub fn new(chain: ProviderChain, model_id: impl Into<String>) -> Self {
        Self { chain, model_id: model_id.into(), slot: RwLock::new(None), load_gate: Mutex::new(()), loading: AtomicBool::new(false) }
    }

    /// Create a handle over the standard Local -> Remote provider order.
    ///
    /// # Arguments
    /// * `model_id` - Model identifier to load on first use
    /// * `local_repo` - Local package checkout probed by the offline provider
    pub fn with_default_providers(model_id: impl Into<String>, local_repo: &Path) -> Self {
        let candidates: Vec<Box<dyn ModelProvider>> = vec![Box::new(LocalProvider::new(local_repo)), Box::new(RemoteProvider::from_env())];
        Self::new(ProviderChain::detect(candidates), model_id)
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    /// Current load state.
    pub fn state(&self) -> BackendState {
        if self.slot.read().is_some() {
            BackendState::Loaded
        } else if self.loading.load(Ordering::SeqCst) {
            BackendState::Loading
        } else {
            BackendState::Unloaded
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.read().is_some()
    }

    /// The loaded backend, if any.
    pub fn get(&self) -> Option<Arc<LoadedBackend>> {
        self.slot.read().clone()
    }

    /// Provider that satisfied the load, once loaded.
    pub fn provider(&self) -> Option<ProviderKind> {
        self.slot.read().as_ref().map(|b| b.provider)
    }

    /// Load the backend if needed.
    ///
    /// # Returns
    /// `true` if the backend is loaded after the call.
    pub fn ensure_loaded(&self) -> bool {
        self.try_ensure_loaded().is_ok()
    }

    /// Load the backend if needed, returning it or the load failure.
    ///
    /// Idempotent: once loaded, returns the existing backend without touching
    /// any provider.
    ///
    /// # Errors
    /// Returns the provider chain's error; the handle stays unloaded.
    pub fn try_ensure_loaded(&self) -> Result<Arc<LoadedBackend>, BackendError> {
        if let Some(backend) = self.get() {
            return Ok(backend);
        }

        let _gate = self.load_gate.lock();

        // Another caller may have finished loading while we waited
        if let Some(backend) = self.get() {
            debug!("Backend loaded by a concurrent request");
            return Ok(backend);
        }

        self.loading.store(true, Ordering::SeqCst);
        info!("📥 Loading model: {}", self.model_id);
        let result = self.chain.load(&self.model_id);

        let outcome = match result {
            Ok(backend) => {
                let backend = Arc::new(backend);
                *self.slot.write() = Some(backend.clone());
                info!("✅ Model loaded successfully ({} provider)", backend.provider);
                Ok(backend)
            }
            Err(e) => {
                error!("❌ Failed to load model: {}", e);
                Err(e)
            }
        };

        self.loading.store(false, Ordering::SeqCst);
        outcome
    }

    /// Release the loaded backend. In-flight requests keep their reference
    /// until they finish.
    pub fn shutdown(&self) {
        let _gate = self.load_gate.lock();
        if self.slot.write().take().is_some() {
            info!("Backend released");
        }
    }
}
