use arc_swap::ArcSwapOption;
use gatehouse_config::{Config, UiRegistration};
use gatehouse_events::{AppEvent, EventBus};
use gatehouse_models::{AllowList, RootDirectories};
use gatehouse_resolver::ResolverSnapshot;
use std::path::PathBuf;
use std::sync::Arc;

/// Registration handle for the UI.
///
/// While started it holds one immutable [`ResolverSnapshot`]; reconfiguring
/// swaps in a whole new snapshot and stopping clears it. Requests load the
/// snapshot once, so they never see half of an old and half of a new config.
pub struct UiMount {
    snapshot: ArcSwapOption<ResolverSnapshot>,
    events: Arc<EventBus>,
}

impl UiMount {
    /// A mount that serves nothing until started
    pub fn stopped(events: Arc<EventBus>) -> Arc<Self> {
        Arc::new(Self {
            snapshot: ArcSwapOption::empty(),
            events,
        })
    }

    pub fn start(config: &Config, events: &Arc<EventBus>) -> Arc<Self> {
        let mount = Self::stopped(Arc::clone(events));
        mount.modify(config);
        mount
    }

    /// Applies a new configuration. An invalid or disabled `[ui]` section
    /// unregisters the mount.
    pub fn modify(&self, config: &Config) {
        let registration = match config.ui_registration() {
            Ok(registration) => registration,
            Err(e) => {
                self.events.emit(AppEvent::UiDisabled {
                    reason: e.to_string(),
                });
                self.stop();
                return;
            }
        };

        if registration.allow_list_defaulted {
            self.events.emit(AppEvent::AllowListDefaulted {
                entries: registration.allowed_directories.len(),
            });
        }

        let snapshot = snapshot_from(registration);
        let context_root = snapshot.context_root.clone();
        let previous = self.snapshot.swap(Some(Arc::new(snapshot)));

        match previous {
            Some(previous) if previous.context_root != context_root => {
                self.events.emit(AppEvent::UiUnregistered {
                    context_root: previous.context_root.clone(),
                });
                self.events.emit(AppEvent::UiRegistered { context_root });
            }
            Some(_) => self.events.emit(AppEvent::UiModified { context_root }),
            None => self.events.emit(AppEvent::UiRegistered { context_root }),
        }
    }

    pub fn stop(&self) {
        if let Some(previous) = self.snapshot.swap(None) {
            self.events.emit(AppEvent::UiUnregistered {
                context_root: previous.context_root.clone(),
            });
        }
    }

    pub fn current(&self) -> Option<Arc<ResolverSnapshot>> {
        self.snapshot.load_full()
    }

    pub fn is_running(&self) -> bool {
        self.snapshot.load().is_some()
    }
}

pub fn snapshot_from(registration: UiRegistration) -> ResolverSnapshot {
    let roots: RootDirectories = registration.roots.into_iter().map(PathBuf::from).collect();
    let allow_list: AllowList = registration
        .allowed_directories
        .into_iter()
        .map(PathBuf::from)
        .collect();

    ResolverSnapshot::new(registration.context_root, roots, allow_list)
        .with_excluded_prefixes(registration.excluded_prefixes)
        .with_default_document(registration.default_document)
        .with_copy_chunk_size(registration.copy_chunk_size)
        .with_streaming_threshold(registration.streaming_threshold)
}
