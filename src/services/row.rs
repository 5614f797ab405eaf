use std::{fmt, sync::Arc};

use crate::items::ManagedItem;

/// Injected action run when a row built from a `T` is chosen.
pub type SelectSink<T> = Arc<dyn Fn(T) + Send + Sync>;

/// A presentable projection of an item.
#[derive(Clone)]
pub struct Row {
  pub title: String,
  pub subtitle: String,
  on_select: Arc<dyn Fn() + Send + Sync>,
}

impl Row {
  pub fn new(
    title: impl Into<String>,
    subtitle: impl Into<String>,
    on_select: impl Fn() + Send + Sync + 'static,
  ) -> Self {
    Row { title: title.into(), subtitle: subtitle.into(), on_select: Arc::new(on_select) }
  }

  /// Builds a row whose selection hands `item` to `select`.
  pub fn for_item<T: ManagedItem>(
    title: impl Into<String>,
    subtitle: impl Into<String>,
    item: T,
    select: &SelectSink<T>,
  ) -> Self {
    let select = Arc::clone(select);
    Row::new(title, subtitle, move || select(item.clone()))
  }

  pub fn select(&self) {
    (self.on_select)();
  }
}

impl fmt::Debug for Row {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Row").field("title", &self.title).field("subtitle", &self.subtitle).finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;
  use crate::items::Friend;

  #[test]
  fn test_select_hands_item_to_sink() {
    let selected = Arc::new(Mutex::new(Vec::new()));
    let sink_selected = selected.clone();
    let sink: SelectSink<Friend> = Arc::new(move |friend| sink_selected.lock().unwrap().push(friend));

    let row = Row::for_item("Ana", "555-1", Friend::new("Ana", "555-1"), &sink);
    row.select();
    row.select();

    assert_eq!(*selected.lock().unwrap(), vec![Friend::new("Ana", "555-1"), Friend::new("Ana", "555-1")]);
  }

  #[test]
  fn test_debug_omits_action() {
    let row = Row::new("Ana", "555-1", || {});

    assert_eq!(format!("{:?}", row), r#"Row { title: "Ana", subtitle: "555-1", .. }"#);
  }
}
