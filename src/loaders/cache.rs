//! Last-known-good snapshot stores.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, error};

use super::loader::{CacheSink, ItemLoader};
use crate::{error::Error, items::ManagedItem};

/// In-memory store that keeps the most recent list it was given.
///
/// Shared between every adapter that references it; concurrent saves are
/// last writer wins.
pub struct MemoryCache<T: ManagedItem> {
  items: Mutex<Option<Vec<T>>>,
}

impl<T: ManagedItem> Default for MemoryCache<T> {
  fn default() -> Self {
    Self { items: Mutex::new(None) }
  }
}

impl<T: ManagedItem> MemoryCache<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a cache that already holds a snapshot.
  pub fn with_items(items: Vec<T>) -> Self {
    Self { items: Mutex::new(Some(items)) }
  }
}

impl<T: ManagedItem> CacheSink<T> for MemoryCache<T> {
  fn save(&self, items: &[T]) {
    match self.items.lock() {
      Ok(mut guard) => {
        debug!("Caching {} items", items.len());
        *guard = Some(items.to_vec());
      },
      Err(e) => error!("Failed to save items to cache: {}", e),
    }
  }
}

#[async_trait]
impl<T: ManagedItem> ItemLoader<T> for MemoryCache<T> {
  async fn load(&self) -> Result<Vec<T>, Error> {
    let guard = self.items.lock().map_err(|e| Error::Cache(format!("Lock poisoned: {}", e)))?;
    guard.clone().ok_or(Error::CacheMiss)
  }
}

/// Cache that discards everything it is given.
///
/// It only implements [`CacheSink`], so it can stand in wherever a cache is
/// written to but can never be wired up as a source to load from.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

impl<T: ManagedItem> CacheSink<T> for NullCache {
  fn save(&self, _items: &[T]) {}
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::items::Friend;

  #[tokio::test]
  async fn test_empty_cache_is_a_miss() {
    let cache: MemoryCache<Friend> = MemoryCache::new();

    assert_eq!(cache.load().await, Err(Error::CacheMiss));
  }

  #[tokio::test]
  async fn test_save_replaces_snapshot() {
    let cache = MemoryCache::with_items(vec![Friend::new("Ana", "555-1")]);

    cache.save(&[Friend::new("Bruno", "555-2"), Friend::new("Carla", "555-3")]);

    assert_eq!(cache.load().await, Ok(vec![Friend::new("Bruno", "555-2"), Friend::new("Carla", "555-3")]));
  }

  #[tokio::test]
  async fn test_saving_an_empty_list_is_still_a_snapshot() {
    let cache = MemoryCache::with_items(vec![Friend::new("Ana", "555-1")]);

    cache.save(&[]);

    assert_eq!(cache.load().await, Ok(vec![]));
  }
}
