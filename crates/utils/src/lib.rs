pub mod http_date;
pub mod path;
pub mod errors;

pub use http_date::*;
pub use path::*;
pub use errors::*;
