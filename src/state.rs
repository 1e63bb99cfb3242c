//! Application state passed to all handlers.

use std::sync::Arc;

use crate::api::LearnApi;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    /// Remote MicroLearn API (auth, generation, history, progress)
    pub api: Arc<dyn LearnApi>,

    /// Per-browser client sessions
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(api: Arc<dyn LearnApi>, sessions: SessionStore) -> Self {
        Self { api, sessions }
    }
}
