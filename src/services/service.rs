use std::sync::Arc;

use async_trait::async_trait;

use super::{fallback::Fallback, retry::retry, row::Row};
use crate::error::Error;

/// Asynchronous producer of presentable rows.
///
/// Completes exactly once per call. Combinators keep no state between calls.
#[async_trait]
pub trait ItemService: Send + Sync + 'static {
  async fn load_items(&self) -> Result<Vec<Row>, Error>;
}

#[async_trait]
impl<S: ItemService + ?Sized> ItemService for Arc<S> {
  async fn load_items(&self) -> Result<Vec<Row>, Error> {
    (**self).load_items().await
  }
}

/// Composition helpers available on every service.
pub trait ItemServiceExt: ItemService + Sized {
  /// Falls back to `secondary` when this service fails.
  fn fallback<S: ItemService>(self, secondary: S) -> Fallback<Self, S> {
    Fallback::new(self, secondary)
  }

  /// Re-invokes this service up to `times` more times while it fails.
  fn retry(self, times: usize) -> Arc<dyn ItemService> {
    retry(self, times)
  }
}

impl<S: ItemService> ItemServiceExt for S {
}
