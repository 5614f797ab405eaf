use std::future::Future;

use tokio::{sync::mpsc::UnboundedSender, task::spawn};
use tracing::error;

use crate::action::Action;

/// Hands results of background work back to the application loop.
///
/// Work runs on the tokio runtime, on whatever thread it lands on. Its
/// completion is only ever observed as an [`Action`] processed by the loop
/// that owns the receiver, so component state is never touched off that loop.
#[derive(Clone, Debug)]
pub struct Dispatcher {
  tx: UnboundedSender<Action>,
}

impl Dispatcher {
  pub fn new(tx: UnboundedSender<Action>) -> Self {
    Self { tx }
  }

  pub fn send(&self, action: Action) {
    if let Err(e) = self.tx.send(action) {
      error!("Failed to send action: {}", e);
    }
  }

  /// Runs `work` in the background and sends `on_complete(output)` to the loop.
  pub fn run<F, C>(&self, work: F, on_complete: C)
  where
    F: Future + Send + 'static,
    F::Output: Send,
    C: FnOnce(F::Output) -> Action + Send + 'static,
  {
    let dispatcher = self.clone();
    spawn(async move {
      let output = work.await;
      dispatcher.send(on_complete(output));
    });
  }
}
