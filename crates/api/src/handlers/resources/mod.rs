mod conditional;
mod layer;
mod response;

pub use conditional::conditional_state;
pub use layer::{not_handled, ui_layer};

#[cfg(test)]
mod tests;
