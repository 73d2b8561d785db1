mod models;
mod defaults;
mod loader;
mod migration;
mod registration;
mod vars;
mod errors;

pub use models::*;
pub use registration::UiRegistration;
pub use vars::substitute_vars;
pub use defaults::DEFAULT_CONFIG_TEMPLATE;
pub use errors::ConfigError;
