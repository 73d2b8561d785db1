mod config;
mod errors;
mod models;

pub use errors::WatcherError;
pub use models::ConfigWatcher;
