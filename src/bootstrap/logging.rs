use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise info for everything, debug for our crates
/// when `GATEHOUSE_DEBUG` is set
pub fn initialize() {
    let default_filter = if std::env::var_os("GATEHOUSE_DEBUG").is_some() {
        "info,gatehouse_resolver=debug,gatehouse_api=debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
