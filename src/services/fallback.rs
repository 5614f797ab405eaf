use async_trait::async_trait;
use tracing::warn;

use super::{row::Row, service::ItemService};
use crate::error::Error;

/// Loads from `primary` and only asks `secondary` when that fails.
///
/// The secondary result is returned as is, success or failure.
pub struct Fallback<P, S> {
  primary: P,
  secondary: S,
}

impl<P: ItemService, S: ItemService> Fallback<P, S> {
  pub fn new(primary: P, secondary: S) -> Self {
    Self { primary, secondary }
  }
}

#[async_trait]
impl<P: ItemService, S: ItemService> ItemService for Fallback<P, S> {
  async fn load_items(&self) -> Result<Vec<Row>, Error> {
    match self.primary.load_items().await {
      Ok(rows) => Ok(rows),
      Err(err) => {
        warn!("Primary service failed, falling back: {}", err);
        self.secondary.load_items().await
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use pretty_assertions::assert_eq;

  use super::*;
  use crate::services::{
    mock::{ScriptedService, rows, titles},
    service::ItemServiceExt,
  };

  #[tokio::test]
  async fn test_primary_success_short_circuits() {
    let primary = Arc::new(ScriptedService::succeeding(rows(&["Ana", "Bruno"])));
    let secondary = Arc::new(ScriptedService::succeeding(rows(&["Cached"])));
    let service = primary.clone().fallback(secondary.clone());

    let result = service.load_items().await.unwrap();

    assert_eq!(titles(&result), vec!["Ana", "Bruno"]);
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 0);
  }

  #[tokio::test]
  async fn test_primary_failure_delegates_to_secondary() {
    let primary = Arc::new(ScriptedService::failing("offline"));
    let secondary = Arc::new(ScriptedService::succeeding(rows(&["Cached"])));
    let service = primary.clone().fallback(secondary.clone());

    let result = service.load_items().await.unwrap();

    assert_eq!(titles(&result), vec!["Cached"]);
    assert_eq!(secondary.calls(), 1);
  }

  #[tokio::test]
  async fn test_both_failing_returns_secondary_error() {
    let primary = Arc::new(ScriptedService::failing("offline"));
    let secondary = Arc::new(ScriptedService::new(vec![Err(Error::CacheMiss)]));
    let service = Fallback::new(primary, secondary);

    let result = service.load_items().await;

    assert_eq!(result.unwrap_err(), Error::CacheMiss);
  }

  #[tokio::test]
  async fn test_chained_fallbacks_stop_at_first_success() {
    let first = Arc::new(ScriptedService::failing("offline"));
    let second = Arc::new(ScriptedService::succeeding(rows(&["Second"])));
    let third = Arc::new(ScriptedService::succeeding(rows(&["Third"])));
    let service = first.fallback(second.clone()).fallback(third.clone());

    let result = service.load_items().await.unwrap();

    assert_eq!(titles(&result), vec!["Second"]);
    assert_eq!(second.calls(), 1);
    assert_eq!(third.calls(), 0);
  }
}
