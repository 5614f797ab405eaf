//! Stand-in for the remote API, serving bundled fixtures.

use std::{
  sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
  },
  time::Duration,
};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::loader::ItemLoader;
use crate::{
  error::Error,
  items::{Card, Friend, ManagedItem, Transfer},
};

const BUNDLED_FIXTURES: &str = include_str!("../../assets/fixtures.json5");

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Fixtures {
  #[serde(default)]
  pub friends: Vec<Friend>,
  #[serde(default)]
  pub cards: Vec<Card>,
  #[serde(default)]
  pub transfers: Vec<Transfer>,
}

impl Fixtures {
  pub fn bundled() -> Result<Self, Error> {
    json5::from_str(BUNDLED_FIXTURES).map_err(|e| Error::Configuration(format!("Invalid bundled fixtures: {}", e)))
  }
}

/// Network-like loader. Every request completes on a spawned task after the
/// configured latency, and fails while offline or for the first `flaky_calls`
/// requests.
pub struct DemoApi {
  fixtures: Arc<Fixtures>,
  latency: Duration,
  offline: bool,
  flaky_calls: AtomicU32,
}

impl DemoApi {
  pub fn new(fixtures: Fixtures) -> Self {
    Self { fixtures: Arc::new(fixtures), latency: Duration::ZERO, offline: false, flaky_calls: AtomicU32::new(0) }
  }

  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = latency;
    self
  }

  pub fn offline(mut self, offline: bool) -> Self {
    self.offline = offline;
    self
  }

  pub fn with_flaky_calls(self, calls: u32) -> Self {
    self.flaky_calls.store(calls, Ordering::SeqCst);
    self
  }

  fn take_flaky_call(&self) -> bool {
    self.flaky_calls.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)).is_ok()
  }

  async fn respond<T: ManagedItem>(&self, resource: &'static str, items: Vec<T>) -> Result<Vec<T>, Error> {
    let latency = self.latency;
    let fail = self.offline || self.take_flaky_call();
    info!("Requesting {} from API", resource);

    let request = tokio::spawn(async move {
      tokio::time::sleep(latency).await;
      if fail {
        warn!("Request for {} failed", resource);
        return Err(Error::Transport(format!("Could not load {}: network unavailable", resource)));
      }
      Ok(items)
    });

    request.await.map_err(|e| Error::Transport(format!("Request for {} was interrupted: {}", resource, e)))?
  }
}

#[async_trait]
impl ItemLoader<Friend> for DemoApi {
  async fn load(&self) -> Result<Vec<Friend>, Error> {
    self.respond("friends", self.fixtures.friends.clone()).await
  }
}

#[async_trait]
impl ItemLoader<Card> for DemoApi {
  async fn load(&self) -> Result<Vec<Card>, Error> {
    self.respond("cards", self.fixtures.cards.clone()).await
  }
}

#[async_trait]
impl ItemLoader<Transfer> for DemoApi {
  async fn load(&self) -> Result<Vec<Transfer>, Error> {
    self.respond("transfers", self.fixtures.transfers.clone()).await
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::items::Direction;

  #[test]
  fn test_bundled_fixtures_parse() {
    let fixtures = Fixtures::bundled().unwrap();

    assert_eq!(fixtures.friends.first(), Some(&Friend::new("Ana", "555-0101")));
    assert_eq!(fixtures.cards.len(), 3);
    assert!(fixtures.transfers.iter().any(|t| t.direction == Direction::Outgoing));
    assert!(fixtures.transfers.iter().any(|t| t.direction == Direction::Incoming));
  }

  #[tokio::test]
  async fn test_serves_fixtures() {
    let api = DemoApi::new(Fixtures { friends: vec![Friend::new("Ana", "555-1")], ..Default::default() });

    let friends = ItemLoader::<Friend>::load(&api).await.unwrap();

    assert_eq!(friends, vec![Friend::new("Ana", "555-1")]);
  }

  #[tokio::test]
  async fn test_offline_api_fails() {
    let api = DemoApi::new(Fixtures::default()).offline(true);

    let result = ItemLoader::<Card>::load(&api).await;

    assert_eq!(result, Err(Error::Transport("Could not load cards: network unavailable".to_string())));
  }

  #[tokio::test]
  async fn test_flaky_calls_fail_then_recover() {
    let api = DemoApi::new(Fixtures::default()).with_flaky_calls(2);

    let first = ItemLoader::<Transfer>::load(&api).await;
    let second = ItemLoader::<Transfer>::load(&api).await;
    let third = ItemLoader::<Transfer>::load(&api).await;

    assert!(first.is_err());
    assert!(second.is_err());
    assert_eq!(third, Ok(vec![]));
  }
}
