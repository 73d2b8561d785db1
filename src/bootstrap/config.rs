use gatehouse_events::{AppEvent, EventBus};
use gatehouse_config::Config;
use gatehouse_filesystem::FileSystem;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// Loads (or creates) the config file. A broken `[ui]` section is not fatal:
/// the server still starts, the mount simply stays unregistered.
pub async fn load(config_path: &str, events: &Arc<EventBus>) -> Result<Config> {
    let abs_config_path = FileSystem::get_absolute_path_string(config_path)?;
    let created = !Path::new(config_path).exists();

    events.emit(AppEvent::ConfigLoading {
        path: abs_config_path.clone(),
    });

    let config = Config::from_file_with_events(config_path, Some(events)).await?;

    if created {
        events.emit(AppEvent::ConfigCreated { path: abs_config_path });
    }

    let roots_count = config
        .ui_registration()
        .map(|registration| registration.roots.len())
        .unwrap_or(0);
    events.emit(AppEvent::ConfigLoaded { roots_count });

    Ok(config)
}
