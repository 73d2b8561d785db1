use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { addr: String, context_root: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { roots_count: usize },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },
    ConfigReloaded,
    ConfigError { error: String },

    // UI mount lifecycle
    UiRegistered { context_root: String },
    UiModified { context_root: String },
    UiUnregistered { context_root: String },
    UiDisabled { reason: String },

    // Root directories
    RootMissing { path: String },
    AllowListDefaulted { entries: usize },

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
