//! Turns an untrusted request path into a file from one of several
//! prioritized root directories.
//!
//! The pipeline is normalizer → locator → guard → delivery. The locator and
//! the guard are separate checks over separately computed
//! canonical paths: a file must sit inside the root it was found in *and*
//! inside one of the allow-listed directories.

pub mod delivery;
pub mod guard;
pub mod locator;
pub mod mime;
pub mod normalizer;
mod errors;
mod resolver;
mod snapshot;

pub use errors::ResolveError;
pub use mime::{GuessRegistry, MimeRegistry};
pub use resolver::{Resolver, Route};
pub use snapshot::ResolverSnapshot;
