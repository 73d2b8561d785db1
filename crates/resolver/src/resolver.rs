use super::delivery::{copy_resource, resource_modified, CountingReader};
use super::errors::ResolveError;
use super::mime::{content_type, GuessRegistry, MimeRegistry};
use super::normalizer::{mount_target, normalize, MountTarget, Target};
use super::snapshot::ResolverSnapshot;
use super::{guard, locator};
use gatehouse_filesystem::FileSystem;
use gatehouse_models::{ConditionalState, RequestPath, Resolution, ResolvedResource};
use gatehouse_utils::decode_path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWrite;

/// Where a request goes before any file is looked at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    NotHandled,
    Redirect,
    Resource(RequestPath),
}

/// Stateless request resolver. Configuration comes in per call as a
/// [`ResolverSnapshot`], so one instance serves any number of concurrent
/// requests and survives reconfiguration untouched.
#[derive(Clone)]
pub struct Resolver {
    registry: Arc<dyn MimeRegistry>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::with_registry(Arc::new(GuessRegistry))
    }

    pub fn with_registry(registry: Arc<dyn MimeRegistry>) -> Self {
        Self { registry }
    }

    /// Decides whether a request belongs to this mount and, if so, which
    /// resource path it names. Touches no files.
    pub fn route(&self, snapshot: &ResolverSnapshot, request_path: &str) -> Result<Route, ResolveError> {
        let raw_target = match mount_target(request_path, &snapshot.context_root) {
            MountTarget::Outside => return Ok(Route::NotHandled),
            MountTarget::Inside(target) => target,
        };

        let decoded = match raw_target {
            Some(raw) => Some(decode_path(raw).map_err(|e| {
                tracing::debug!("route: undecodable path: {}", e);
                ResolveError::NotFound
            })?),
            None => None,
        };

        let path = match normalize(decoded.as_deref(), &snapshot.default_document) {
            Target::Redirect => return Ok(Route::Redirect),
            Target::Path(path) => path,
        };

        if snapshot.is_excluded(&path) {
            tracing::debug!("route: {:?} is excluded, not handling", path.as_str());
            return Ok(Route::NotHandled);
        }

        Ok(Route::Resource(path))
    }

    /// Resolves the raw (still percent-encoded) URI path of a request
    pub async fn resolve(
        &self,
        snapshot: &ResolverSnapshot,
        request_path: &str,
        conditional: ConditionalState,
    ) -> Result<Resolution, ResolveError> {
        let path = match self.route(snapshot, request_path)? {
            Route::NotHandled => return Ok(Resolution::NotHandled),
            Route::Redirect => return Ok(Resolution::Redirect),
            Route::Resource(path) => path,
        };

        let located = locator::locate(&path, &snapshot.roots).await.ok_or_else(|| {
            tracing::debug!("resolve: {:?} not found under any root", path.as_str());
            ResolveError::NotFound
        })?;

        if !guard::check(&located, &snapshot.allow_list).await {
            tracing::warn!("resolve: {:?} located outside the allow-list, forbidden", path.as_str());
            return Err(ResolveError::Forbidden);
        }

        let resource = ResolvedResource {
            content_type: content_type(self.registry.as_ref(), path.as_str()),
            last_modified: FileSystem::last_modified_millis(&located).await,
            default_document: snapshot.is_default_document(&path),
            request_path: path,
            path: located,
        };

        if resource_modified(resource.last_modified, conditional) {
            Ok(Resolution::Modified(resource))
        } else {
            tracing::debug!("resolve: {:?} not modified", resource.request_path.as_str());
            Ok(Resolution::NotModified(resource))
        }
    }

    /// Streams the resource into `writer`, returning the exact byte count
    pub async fn deliver<W>(
        &self,
        resource: &ResolvedResource,
        writer: &mut W,
        chunk_size: usize,
    ) -> Result<u64, ResolveError>
    where
        W: AsyncWrite + Unpin,
    {
        let (reader, _) = self.open(resource).await?;
        let copied = copy_resource(reader, writer, chunk_size).await?;

        tracing::debug!("deliver: {:?} ({} bytes)", resource.request_path.as_str(), copied);
        Ok(copied)
    }

    /// Opens the resource for streaming. The length comes from the open
    /// handle, so it describes the same file the reader will produce.
    pub async fn open(&self, resource: &ResolvedResource) -> Result<(CountingReader<File>, u64), ResolveError> {
        let file = File::open(&resource.path).await?;
        let length = file.metadata().await?.len();

        Ok((CountingReader::new(file, resource.request_path.as_str()), length))
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
