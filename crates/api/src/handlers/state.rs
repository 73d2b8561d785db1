use super::models::AppState;
use crate::mount::UiMount;
use axum::extract::FromRef;
use gatehouse_resolver::Resolver;
use std::sync::Arc;

impl AppState {
    pub fn new(mount: Arc<UiMount>) -> Self {
        Self::with_resolver(mount, Resolver::new())
    }

    pub fn with_resolver(mount: Arc<UiMount>, resolver: Resolver) -> Self {
        Self { mount, resolver }
    }
}

impl FromRef<AppState> for Arc<UiMount> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.mount)
    }
}
