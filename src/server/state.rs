use std::sync::Arc;
use std::time::Duration;

use crate::session::SessionController;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<SessionController>,
    // Caller-side limit on a single generation
    pub generation_timeout: Duration,
}

impl AppState {
    pub fn new(controller: Arc<SessionController>, generation_timeout: Duration) -> Self {
        Self { controller, generation_timeout }
    }
}
