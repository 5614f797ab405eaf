use strum::Display;

use crate::{composition::Screen, error::Error, items::Item, services::Row};

#[derive(Debug, Clone, Display)]
pub enum Action {
  Error(String),
  ExitError,
  ItemSelected(Item),
  /// Completion of a service call, delivered to the list that issued `request`.
  LoadCompleted {
    screen: Screen,
    request: u64,
    result: Result<Vec<Row>, Error>,
  },
  NextTab,
  PreviousTab,
  Quit,
  Refresh,
  Render,
  Resize(u16, u16),
  Resume,
  SelectCurrent,
  SelectNext,
  SelectPrevious,
  Suspend,
  Tick,
}
