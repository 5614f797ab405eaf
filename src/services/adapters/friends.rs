use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
  error::Error,
  items::Friend,
  loaders::{CacheSink, ItemLoader},
  services::{ItemService, Row, SelectSink},
};

pub fn friend_row(friend: Friend, select: &SelectSink<Friend>) -> Row {
  Row::for_item(friend.name.clone(), friend.phone.clone(), friend, select)
}

/// Loads friends from the API and, for premium users, keeps the cache up to
/// date with every successful load.
pub struct FriendsServiceAdapter {
  loader: Arc<dyn ItemLoader<Friend>>,
  cache: Arc<dyn CacheSink<Friend>>,
  is_premium: bool,
  select: SelectSink<Friend>,
}

impl FriendsServiceAdapter {
  pub fn new(
    loader: Arc<dyn ItemLoader<Friend>>,
    cache: Arc<dyn CacheSink<Friend>>,
    is_premium: bool,
    select: SelectSink<Friend>,
  ) -> Self {
    Self { loader, cache, is_premium, select }
  }
}

#[async_trait]
impl ItemService for FriendsServiceAdapter {
  async fn load_items(&self) -> Result<Vec<Row>, Error> {
    let friends = self.loader.load().await?;
    info!("Loaded {} friends", friends.len());

    if self.is_premium {
      debug!("Saving friends to cache");
      self.cache.save(&friends);
    }

    Ok(friends.into_iter().map(|friend| friend_row(friend, &self.select)).collect())
  }
}
