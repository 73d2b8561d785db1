mod bootstrap;

use gatehouse_api::{AppState, UiMount};
use gatehouse_events::{AppEvent, EventBus};
use gatehouse_watcher::ConfigWatcher;
use crate::bootstrap::{config, logging, router, server};
use anyhow::Result;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let events = EventBus::new(false);
    events.emit(AppEvent::Starting);

    let config_path = std::env::var("GATEHOUSE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::load(&config_path, &events).await?;

    let mount = UiMount::start(&config, &events);
    server::inspect_roots(&mount, &events).await;

    let app = router::build(&config, AppState::new(Arc::clone(&mount)));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let tcp_nodelay = config.server.tcp_nodelay;
    let context_root = mount
        .current()
        .map(|snapshot| snapshot.context_root.clone())
        .unwrap_or_else(|| "(disabled)".to_string());

    let config_watcher = Arc::new(ConfigWatcher::new(
        config,
        config_path,
        Arc::clone(&mount),
        Arc::clone(&events),
    ));
    let config_watcher_handle = config_watcher.start_watching().await?;

    let listener = bind_server(&addr).await?;

    events.emit(AppEvent::Ready {
        addr: addr.to_string(),
        context_root,
    });

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received, initiating graceful shutdown...");
    };

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(tcp_nodelay)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    // Graceful shutdown: wait for config watcher to stop
    config_watcher_handle.abort();
    let _ = config_watcher_handle.await;

    mount.stop();
    events.emit(AppEvent::Shutdown);
    Ok(())
}

async fn bind_server(addr: &str) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            let port = addr.split(':').last().unwrap_or("unknown");
            tracing::error!("❌ Port {} is already in use", port);
            tracing::error!("Another application is using this port");
            tracing::error!("Solutions:");
            tracing::error!("1. Stop the other application");
            tracing::error!("2. Change the port in config.toml");
            #[cfg(target_os = "windows")]
            tracing::error!("3. Find process: netstat -ano | findstr :{}", port);
            #[cfg(not(target_os = "windows"))]
            tracing::error!("3. Find process: lsof -i :{}", port);
        } else {
            tracing::error!("❌ Failed to bind server on {}: {}", addr, e);
        }
        anyhow::anyhow!("Failed to bind server: {}", e)
    })
}
