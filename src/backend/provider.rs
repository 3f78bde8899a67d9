//! Model providers and the fixed-priority chain that selects between them.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::BackendError;
use super::model::LoadedBackend;

/// Where a backend was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local package checkout (offline)
    Local,
    /// Remote model hub
    Remote,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Local => write!(f, "local"),
            ProviderKind::Remote => write!(f, "remote"),
        }
    }
}

/// A strategy for loading a model and tokenizer by identifier.
pub trait ModelProvider: Send + Sync {
    /// Which provider this is.
    fn kind(&self) -> ProviderKind;

    /// Static capability check, evaluated once when the chain is built.
    fn is_available(&self) -> bool;

    /// Load the model and tokenizer named by `model_id`.
    ///
    /// # Errors
    /// Returns an error if the model cannot be located or initialized.
    fn load(&self, model_id: &str) -> Result<LoadedBackend, BackendError>;
}

/// Available providers in priority order, fixed at construction.
pub struct ProviderChain {
    providers: Vec<Box<dyn ModelProvider>>,
}

impl fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

impl ProviderChain {
    /// Keep the candidates whose capability check passes, preserving order.
    ///
    /// # Arguments
    /// * `candidates` - Providers in priority order
    ///
    /// # Returns
    /// A chain containing only the available providers.
    pub fn detect(candidates: Vec<Box<dyn ModelProvider>>) -> Self {
        let providers: Vec<_> = candidates
            .into_iter()
            .filter(|p| {
                let available = p.is_available();
                if available {
                    info!("✅ {} provider available", p.kind());
                } else {
                    info!("⚠️ {} provider unavailable, skipping", p.kind());
                }
                available
            })
            .collect();

        if providers.is_empty() {
            warn!("No model provider is available; generation requests will fail until restart");
        }

        Self { providers }
    }

    /// Provider kinds in the order they will be tried.
    pub fn kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Load `model_id` from the first provider that succeeds.
    ///
    /// # Errors
    /// Returns [`BackendError::NoProvider`] for an empty chain, or
    /// [`BackendError::Exhausted`] listing each provider's failure.
    pub fn load(&self, model_id: &str) -> Result<LoadedBackend, BackendError> {
        if self.providers.is_empty() {
            return Err(BackendError::NoProvider);
        }

        let mut attempts = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            info!("📥 Loading {} via {} provider", model_id, provider.kind());
            match provider.load(model_id) {
                Ok(backend) => return Ok(backend),
                Err(e) => {
                    warn!("❌ {} provider failed: {}", provider.kind(), e);
                    attempts.push((provider.kind(), e.to_string()));
                }
            }
        }

        Err(BackendError::Exhausted(attempts))
    }
}
