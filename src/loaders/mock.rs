use std::{
  collections::VecDeque,
  sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  },
};

use async_trait::async_trait;

use super::loader::{CacheSink, ItemLoader};
use crate::{error::Error, items::ManagedItem};

/// Loader that replays a script of results, repeating the last one once the
/// script runs out.
pub struct ScriptedLoader<T: ManagedItem> {
  script: Mutex<VecDeque<Result<Vec<T>, Error>>>,
  last: Mutex<Result<Vec<T>, Error>>,
  calls: AtomicUsize,
}

impl<T: ManagedItem> ScriptedLoader<T> {
  pub fn new(script: Vec<Result<Vec<T>, Error>>) -> Self {
    Self {
      script: Mutex::new(script.into()),
      last: Mutex::new(Err(Error::Transport("Script exhausted".to_string()))),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn succeeding(items: Vec<T>) -> Self {
    Self::new(vec![Ok(items)])
  }

  pub fn failing(message: &str) -> Self {
    Self::new(vec![Err(Error::Transport(message.to_string()))])
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl<T: ManagedItem> ItemLoader<T> for ScriptedLoader<T> {
  async fn load(&self) -> Result<Vec<T>, Error> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let next = self.script.lock().unwrap().pop_front();
    let mut last = self.last.lock().unwrap();
    if let Some(result) = next {
      *last = result;
    }
    last.clone()
  }
}

/// Cache sink that records every save.
pub struct RecordingCache<T: ManagedItem> {
  saves: Mutex<Vec<Vec<T>>>,
}

impl<T: ManagedItem> Default for RecordingCache<T> {
  fn default() -> Self {
    Self { saves: Mutex::new(Vec::new()) }
  }
}

impl<T: ManagedItem> RecordingCache<T> {
  pub fn saves(&self) -> Vec<Vec<T>> {
    self.saves.lock().unwrap().clone()
  }
}

impl<T: ManagedItem> CacheSink<T> for RecordingCache<T> {
  fn save(&self, items: &[T]) {
    self.saves.lock().unwrap().push(items.to_vec());
  }
}
