use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::{
  error::Error,
  items::{
    Direction, Transfer,
    format::{DateStyle, format_currency, format_date},
  },
  loaders::ItemLoader,
  services::{ItemService, Row, SelectSink},
};

pub fn transfer_row(transfer: Transfer, date_style: DateStyle, select: &SelectSink<Transfer>) -> Row {
  let amount = format_currency(transfer.amount, &transfer.currency_code);
  let title = format!("{} • {}", amount, transfer.description);
  let date = format_date(&transfer.date, date_style);
  let subtitle = match transfer.direction {
    Direction::Outgoing => format!("Sent to: {} on {}", transfer.recipient, date),
    Direction::Incoming => format!("Received from: {} on {}", transfer.sender, date),
  };
  Row::for_item(title, subtitle, transfer, select)
}

/// Shows the transfers going one way, in the order the loader returned them.
pub struct TransfersServiceAdapter {
  loader: Arc<dyn ItemLoader<Transfer>>,
  direction: Direction,
  date_style: DateStyle,
  select: SelectSink<Transfer>,
}

impl TransfersServiceAdapter {
  pub fn new(
    loader: Arc<dyn ItemLoader<Transfer>>,
    direction: Direction,
    date_style: DateStyle,
    select: SelectSink<Transfer>,
  ) -> Self {
    Self { loader, direction, date_style, select }
  }

  pub fn sent(loader: Arc<dyn ItemLoader<Transfer>>, select: SelectSink<Transfer>) -> Self {
    Self::new(loader, Direction::Outgoing, DateStyle::Long, select)
  }

  pub fn received(loader: Arc<dyn ItemLoader<Transfer>>, select: SelectSink<Transfer>) -> Self {
    Self::new(loader, Direction::Incoming, DateStyle::Short, select)
  }
}

#[async_trait]
impl ItemService for TransfersServiceAdapter {
  async fn load_items(&self) -> Result<Vec<Row>, Error> {
    let transfers = self.loader.load().await?;
    let rows: Vec<Row> = transfers
      .into_iter()
      .filter(|transfer| transfer.direction == self.direction)
      .map(|transfer| transfer_row(transfer, self.date_style, &self.select))
      .collect();
    info!("Loaded {} {:?} transfers", rows.len(), self.direction);
    Ok(rows)
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::loaders::mock::ScriptedLoader;

  fn transfer(description: &str, direction: Direction) -> Transfer {
    Transfer {
      sender: "Ana".to_string(),
      recipient: "Bruno".to_string(),
      amount: 1250.0,
      currency_code: "USD".to_string(),
      date: Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap(),
      description: description.to_string(),
      direction,
    }
  }

  fn no_select() -> SelectSink<Transfer> {
    Arc::new(|_| {})
  }

  fn mixed() -> Vec<Transfer> {
    vec![
      transfer("one", Direction::Outgoing),
      transfer("two", Direction::Incoming),
      transfer("three", Direction::Outgoing),
      transfer("four", Direction::Incoming),
      transfer("five", Direction::Outgoing),
    ]
  }

  async fn titles_for(adapter: TransfersServiceAdapter) -> Vec<String> {
    adapter.load_items().await.unwrap().into_iter().map(|row| row.title).collect()
  }

  #[tokio::test]
  async fn test_sent_keeps_outgoing_in_order() {
    let adapter = TransfersServiceAdapter::sent(Arc::new(ScriptedLoader::succeeding(mixed())), no_select());

    assert_eq!(titles_for(adapter).await, vec!["$1,250.00 • one", "$1,250.00 • three", "$1,250.00 • five"]);
  }

  #[tokio::test]
  async fn test_received_keeps_incoming_in_order() {
    let adapter = TransfersServiceAdapter::received(Arc::new(ScriptedLoader::succeeding(mixed())), no_select());

    assert_eq!(titles_for(adapter).await, vec!["$1,250.00 • two", "$1,250.00 • four"]);
  }

  #[test]
  fn test_sent_row_uses_long_date_and_recipient() {
    let row = transfer_row(transfer("Lunch", Direction::Outgoing), DateStyle::Long, &no_select());

    assert_eq!(row.title, "$1,250.00 • Lunch");
    assert_eq!(row.subtitle, "Sent to: Bruno on January 5, 2024 at 3:04 PM");
  }

  #[test]
  fn test_received_row_uses_short_date_and_sender() {
    let row = transfer_row(transfer("Lunch", Direction::Incoming), DateStyle::Short, &no_select());

    assert_eq!(row.subtitle, "Received from: Ana on 1/5/24, 3:04 PM");
  }

  #[tokio::test]
  async fn test_failure_is_passed_through() {
    let loader = Arc::new(ScriptedLoader::<Transfer>::failing("offline"));
    let adapter = TransfersServiceAdapter::sent(loader, no_select());

    assert_eq!(adapter.load_items().await.unwrap_err(), Error::Transport("offline".to_string()));
  }
}
