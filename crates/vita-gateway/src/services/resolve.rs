//! Tiered backend resolution
//!
//! Runs one operation against the ordered backend chain. A backend that
//! returns a recoverable fault (missing relation, connection loss, pool
//! exhaustion) is skipped and the next backend gets the same operation.
//! Domain errors such as "post not found" are authoritative and returned
//! immediately without falling through.

use futures_util::future::BoxFuture;
use tracing::warn;

use vita_core::{FileStoreRef, SocialStore, SocialStoreRef, StoreResult};

use super::error::{GatewayError, GatewayResult, StoreFailure};

/// Resolve `op` against the backend chain, falling through on recoverable
/// faults. Returns the aggregate failure list when every backend fails.
pub(crate) async fn resolve_social<T, F>(
    stores: &[SocialStoreRef],
    operation: &'static str,
    op: F,
) -> GatewayResult<T>
where
    F: for<'s> Fn(&'s dyn SocialStore) -> BoxFuture<'s, StoreResult<T>>,
{
    let mut failures: Vec<StoreFailure> = Vec::new();

    for store in stores {
        match op(store.as_ref()).await {
            Ok(value) => {
                if !failures.is_empty() {
                    warn!(
                        operation,
                        served_by = store.name(),
                        skipped = failures.len(),
                        "operation served by fallback backend"
                    );
                }
                return Ok(value);
            }
            Err(err) if err.is_recoverable() => {
                warn!(
                    operation,
                    store = store.name(),
                    error = %err,
                    "backend unavailable, trying next tier"
                );
                failures.push(StoreFailure {
                    store: store.name(),
                    error: err,
                });
            }
            Err(err) => return Err(GatewayError::Domain(err)),
        }
    }

    Err(GatewayError::AllStoresFailed {
        operation,
        failures,
    })
}

/// Store `bytes` under `path`, trying each file store in chain order. The
/// first store that accepts the upload wins; when every store refuses, the
/// upload fails as a whole.
pub(crate) async fn store_file(
    stores: &[FileStoreRef],
    path: &str,
    bytes: &[u8],
) -> GatewayResult<String> {
    let mut last_error = None;

    for store in stores {
        match store.store(path, bytes).await {
            Ok(url) => return Ok(url),
            Err(err) => {
                warn!(
                    store = store.name(),
                    path,
                    error = %err,
                    "file store rejected upload, trying next tier"
                );
                last_error = Some(err);
            }
        }
    }

    Err(GatewayError::ImageUploadFailed(
        last_error.map_or_else(|| "no file store configured".to_string(), |e| e.to_string()),
    ))
}

/// Best-effort removal across the file store chain. Stops at the first store
/// that acknowledges the delete; failures are logged and swallowed.
pub(crate) async fn remove_file(stores: &[FileStoreRef], path: &str) {
    for store in stores {
        match store.remove(path).await {
            Ok(()) => return,
            Err(err) => {
                warn!(
                    store = store.name(),
                    path,
                    error = %err,
                    "failed to remove stored file"
                );
            }
        }
    }
}

/// Like [`resolve_social`], but degrades an exhausted backend chain into the
/// type's default value (empty list, zero count). Used on list and count
/// reads so the UI renders an empty state instead of an error page.
pub(crate) async fn resolve_social_or_default<T, F>(
    stores: &[SocialStoreRef],
    operation: &'static str,
    op: F,
) -> GatewayResult<T>
where
    T: Default,
    F: for<'s> Fn(&'s dyn SocialStore) -> BoxFuture<'s, StoreResult<T>>,
{
    match resolve_social(stores, operation, op).await {
        Err(GatewayError::AllStoresFailed { operation, .. }) => {
            warn!(operation, "all backends failed, serving default value");
            Ok(T::default())
        }
        other => other,
    }
}
