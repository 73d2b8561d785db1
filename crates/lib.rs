// Re-export all public APIs from the workspace crates

pub use gatehouse_models::*;
pub use gatehouse_events::*;
pub use gatehouse_utils::*;
pub use gatehouse_filesystem::*;
pub use gatehouse_config::*;
pub use gatehouse_resolver::*;
pub use gatehouse_watcher::*;
pub use gatehouse_api::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Core models
    pub use gatehouse_models::{
        AllowList, ConditionalState, RequestPath, Resolution, ResolvedResource, RootDirectories,
    };

    // Events
    pub use gatehouse_events::{AppEvent, EventBus};

    // Resolution
    pub use gatehouse_resolver::{MimeRegistry, ResolveError, Resolver, ResolverSnapshot};

    // Configuration
    pub use gatehouse_config::Config;

    // Mount lifecycle and HTTP glue
    pub use gatehouse_api::{ui_layer, AppState, UiMount};

    // Watcher
    pub use gatehouse_watcher::ConfigWatcher;

    // Filesystem
    pub use gatehouse_filesystem::FileSystem;
}
