use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marker trait for records that loaders produce and adapters present.
pub trait ManagedItem: Clone + Send + Sync + 'static {}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
  pub name: String,
  pub phone: String,
}

impl Friend {
  pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
    Friend { name: name.into(), phone: phone.into() }
  }
}

impl ManagedItem for Friend {
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
  pub number: String,
  pub holder: String,
}

impl Card {
  pub fn new(number: impl Into<String>, holder: impl Into<String>) -> Self {
    Card { number: number.into(), holder: holder.into() }
  }
}

impl ManagedItem for Card {
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
  Outgoing,
  Incoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
  pub sender: String,
  pub recipient: String,
  pub amount: f64,
  pub currency_code: String,
  pub date: DateTime<Utc>,
  pub description: String,
  pub direction: Direction,
}

impl Transfer {
  pub fn is_outgoing(&self) -> bool {
    self.direction == Direction::Outgoing
  }

  /// The other party of the transfer, seen from the current user.
  pub fn counterpart(&self) -> &str {
    match self.direction {
      Direction::Outgoing => &self.recipient,
      Direction::Incoming => &self.sender,
    }
  }
}

impl ManagedItem for Transfer {
}

/// Any item a row can be built from.
///
/// Only used where a selection leaves the typed adapters, e.g. when it is
/// reported back to the application loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
  Friend(Friend),
  Card(Card),
  Transfer(Transfer),
}

impl Item {
  pub fn summary(&self) -> String {
    match self {
      Item::Friend(friend) => format!("Friend {} ({})", friend.name, friend.phone),
      Item::Card(card) => format!("Card of {}", card.holder),
      Item::Transfer(transfer) => format!(
        "Transfer {} {} {}: {}",
        if transfer.is_outgoing() { "to" } else { "from" },
        transfer.counterpart(),
        transfer.currency_code,
        transfer.description
      ),
    }
  }
}

impl From<Friend> for Item {
  fn from(friend: Friend) -> Self {
    Item::Friend(friend)
  }
}

impl From<Card> for Item {
  fn from(card: Card) -> Self {
    Item::Card(card)
  }
}

impl From<Transfer> for Item {
  fn from(transfer: Transfer) -> Self {
    Item::Transfer(transfer)
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn transfer(direction: Direction) -> Transfer {
    Transfer {
      sender: "Ana".to_string(),
      recipient: "Bruno".to_string(),
      amount: 12.5,
      currency_code: "USD".to_string(),
      date: Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap(),
      description: "Lunch".to_string(),
      direction,
    }
  }

  #[test]
  fn test_counterpart_follows_direction() {
    assert_eq!(transfer(Direction::Outgoing).counterpart(), "Bruno");
    assert_eq!(transfer(Direction::Incoming).counterpart(), "Ana");
  }

  #[test]
  fn test_item_summary() {
    assert_eq!(Item::from(Friend::new("Ana", "555-1")).summary(), "Friend Ana (555-1)");
    assert_eq!(Item::from(Card::new("4111", "Ana")).summary(), "Card of Ana");
    assert_eq!(Item::from(transfer(Direction::Incoming)).summary(), "Transfer from Ana USD: Lunch");
  }

  #[test]
  fn test_direction_deserializes_from_snake_case() {
    let direction: Direction = json5::from_str(r#""outgoing""#).unwrap();
    assert_eq!(direction, Direction::Outgoing);
  }
}
