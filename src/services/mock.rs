use std::{
  collections::VecDeque,
  sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  },
};

use async_trait::async_trait;

use super::{row::Row, service::ItemService};
use crate::error::Error;

pub fn rows(titles: &[&str]) -> Vec<Row> {
  titles.iter().map(|title| Row::new(*title, "", || {})).collect()
}

pub fn titles(rows: &[Row]) -> Vec<String> {
  rows.iter().map(|row| row.title.clone()).collect()
}

/// Service that replays a script of results, repeating the last one once the
/// script runs out.
pub struct ScriptedService {
  script: Mutex<VecDeque<Result<Vec<Row>, Error>>>,
  last: Mutex<Result<Vec<Row>, Error>>,
  calls: AtomicUsize,
}

impl ScriptedService {
  pub fn new(script: Vec<Result<Vec<Row>, Error>>) -> Self {
    Self {
      script: Mutex::new(script.into()),
      last: Mutex::new(Err(Error::Transport("Script exhausted".to_string()))),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn succeeding(rows: Vec<Row>) -> Self {
    Self::new(vec![Ok(rows)])
  }

  pub fn failing(message: &str) -> Self {
    Self::new(vec![Err(Error::Transport(message.to_string()))])
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ItemService for ScriptedService {
  async fn load_items(&self) -> Result<Vec<Row>, Error> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let next = self.script.lock().unwrap().pop_front();
    let mut last = self.last.lock().unwrap();
    if let Some(result) = next {
      *last = result;
    }
    last.clone()
  }
}
