use thiserror::Error;

/// Failures of a single resolution.
/// Display strings go to clients, so they never mention filesystem paths.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Resource not found")]
    NotFound,

    #[error("Access to the requested resource is forbidden")]
    Forbidden,

    #[error("I/O error while delivering resource: {0}")]
    Io(#[from] std::io::Error),
}
