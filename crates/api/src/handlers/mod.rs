mod models;
mod state;
pub mod resources;

pub use models::AppState;
pub use resources::{not_handled, ui_layer};
