use async_trait::async_trait;

use crate::{error::Error, items::ManagedItem};

/// Asynchronous source of one kind of item, e.g. a network API or a cache.
///
/// Implementations may complete on any worker thread. Callers are expected
/// to bring the result back to their own context before touching state.
#[async_trait]
pub trait ItemLoader<T: ManagedItem>: Send + Sync + 'static {
  async fn load(&self) -> Result<Vec<T>, Error>;
}

/// Write side of a cache store. Saving is fire-and-forget.
pub trait CacheSink<T: ManagedItem>: Send + Sync + 'static {
  fn save(&self, items: &[T]);
}
