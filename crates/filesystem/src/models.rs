/// Namespace for the filesystem helpers used by the resolver and bootstrap
pub struct FileSystem;
