use arc_swap::ArcSwap;
use gatehouse_api::UiMount;
use gatehouse_config::Config;
use gatehouse_events::EventBus;
use std::sync::Arc;

pub struct ConfigWatcher {
    /// Last configuration that was applied
    pub(super) config: ArcSwap<Config>,
    pub(super) config_path: String,
    pub(super) mount: Arc<UiMount>,
    pub(super) events: Arc<EventBus>,
}
