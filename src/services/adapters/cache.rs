use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::friends::friend_row;
use crate::{
  error::Error,
  items::Friend,
  loaders::ItemLoader,
  services::{ItemService, Row, SelectSink},
};

/// Degraded source: serves the last friends list saved to the cache.
pub struct FriendsCacheServiceAdapter {
  cache: Arc<dyn ItemLoader<Friend>>,
  select: SelectSink<Friend>,
}

impl FriendsCacheServiceAdapter {
  pub fn new(cache: Arc<dyn ItemLoader<Friend>>, select: SelectSink<Friend>) -> Self {
    Self { cache, select }
  }
}

#[async_trait]
impl ItemService for FriendsCacheServiceAdapter {
  async fn load_items(&self) -> Result<Vec<Row>, Error> {
    let friends = self.cache.load().await?;
    info!("Loaded {} friends from cache", friends.len());
    Ok(friends.into_iter().map(|friend| friend_row(friend, &self.select)).collect())
  }
}
