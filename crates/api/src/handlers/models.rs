use crate::mount::UiMount;
use gatehouse_resolver::Resolver;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(super) mount: Arc<UiMount>,
    pub(super) resolver: Resolver,
}
