use std::sync::Arc;

use super::{fallback::Fallback, service::ItemService};

/// Wraps `base` so that a failure re-invokes it immediately, up to `times`
/// extra attempts. The last attempt's result is returned.
///
/// Built as `base` falling back onto itself `times` times, so no retry state
/// outlives a single call.
pub fn retry<S: ItemService>(base: S, times: usize) -> Arc<dyn ItemService> {
  let base: Arc<dyn ItemService> = Arc::new(base);
  (0..times).fold(Arc::clone(&base), |service, _| -> Arc<dyn ItemService> {
    Arc::new(Fallback::new(service, Arc::clone(&base)))
  })
}
