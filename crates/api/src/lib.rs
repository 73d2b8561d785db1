pub mod handlers;
pub mod models;
pub mod errors;
pub mod mount;

pub use handlers::*;
pub use models::*;
pub use errors::ApiError;
pub use mount::UiMount;
