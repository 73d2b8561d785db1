use gatehouse_api::UiMount;
use gatehouse_events::{AppEvent, EventBus};
use gatehouse_filesystem::FileSystem;
use std::path::Path;
use std::sync::Arc;

/// Reports configured directories that do not exist yet. Missing roots are
/// skipped at request time, so this only warns.
pub async fn inspect_roots(mount: &UiMount, events: &Arc<EventBus>) {
    let Some(snapshot) = mount.current() else {
        return;
    };

    for dir in snapshot.roots.iter().chain(snapshot.allow_list.iter()) {
        if !FileSystem::is_directory(dir).await {
            events.emit(AppEvent::RootMissing {
                path: display_path(dir),
            });
        }
    }
}

fn display_path(path: &Path) -> String {
    FileSystem::get_absolute_path_string(&path.to_string_lossy())
        .unwrap_or_else(|_| path.display().to_string())
}
