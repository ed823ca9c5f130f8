use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config, recorder::SessionRecorder, sessions::SessionRegistry, store::ProgressSink,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionRegistry,
    pub recorder: SessionRecorder,
}

impl AppState {
    pub fn new(config: Config, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            config,
            sessions: SessionRegistry::new(),
            recorder: SessionRecorder::new(sink),
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SessionRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for SessionRecorder {
    fn from_ref(state: &AppState) -> Self {
        state.recorder.clone()
    }
}
