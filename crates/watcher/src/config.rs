use super::errors::WatcherError;
use super::models::ConfigWatcher;
use arc_swap::ArcSwap;
use gatehouse_api::UiMount;
use gatehouse_config::Config;
use gatehouse_events::{AppEvent, EventBus};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;

type Result<T> = std::result::Result<T, WatcherError>;

impl ConfigWatcher {
    pub fn new(config: Config, config_path: String, mount: Arc<UiMount>, events: Arc<EventBus>) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            config_path,
            mount,
            events,
        }
    }

    pub fn get_config(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Anything that feeds the resolver snapshot
    fn ui_config_changed(old: &Config, new: &Config) -> bool {
        old.ui != new.ui || old.properties != new.properties
    }

    /// Settings only read while binding the listener
    fn server_config_changed(old: &Config, new: &Config) -> bool {
        old.server.host != new.server.host
            || old.server.port != new.server.port
            || old.server.tcp_nodelay != new.server.tcp_nodelay
            || old.server.timeout_secs != new.server.timeout_secs
            || old.server.max_concurrent_requests != new.server.max_concurrent_requests
    }

    /// Swaps in `new_config`, remounting the UI when its settings changed.
    /// Returns whether the mount was touched.
    pub fn apply(&self, new_config: Config) -> bool {
        let old_config = self.config.load_full();

        if Self::server_config_changed(&old_config, &new_config) {
            tracing::warn!("[server] settings changed; restart to apply them");
        }

        let remount = Self::ui_config_changed(&old_config, &new_config);
        if remount {
            self.mount.modify(&new_config);
        }

        self.config.store(Arc::new(new_config));
        self.events.emit(AppEvent::ConfigReloaded);

        remount
    }

    pub async fn start_watching(self: Arc<Self>) -> Result<tokio::task::JoinHandle<()>> {
        let handle = tokio::spawn(async move {
            if let Err(e) = self.watch_config_file().await {
                tracing::error!("Config watcher error: {}", e);
            }
        });

        Ok(handle)
    }

    async fn watch_config_file(&self) -> Result<()> {
        let channel_size = self.get_config().server.config_reload_channel_size.max(1);
        let (tx, mut rx) = tokio::sync::mpsc::channel(channel_size);

        let mut watcher: RecommendedWatcher = notify::recommended_watcher(
            move |res: std::result::Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if matches!(
                        event.kind,
                        notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                    ) {
                        let _ = tx.blocking_send(());
                    }
                }
            },
        )?;

        watcher.watch(Path::new(&self.config_path), RecursiveMode::NonRecursive)?;

        while rx.recv().await.is_some() {
            let debounce_ms = self.get_config().server.config_watch_debounce_ms;
            tokio::time::sleep(tokio::time::Duration::from_millis(debounce_ms)).await;

            // Collapse the burst of events an editor save produces
            while rx.try_recv().is_ok() {}

            if !Path::new(&self.config_path).exists() {
                tracing::warn!("Config file deleted, ignoring event");
                continue;
            }

            match Config::from_file_with_events(&self.config_path, Some(&self.events)).await {
                Ok(new_config) => {
                    if self.apply(new_config) {
                        tracing::info!("UI configuration reloaded from {}", self.config_path);
                    }
                }
                Err(e) => {
                    self.events.emit(AppEvent::ConfigError {
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
