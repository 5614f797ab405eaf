use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
  action::Action,
  tui::{Event, Frame},
};

pub mod error_view;
pub mod footer;
pub mod list_controller;

pub use error_view::ErrorView;
pub use footer::InstructionFooter;
pub use list_controller::{ListController, RetryPolicy};

#[async_trait::async_trait]
pub trait Component: Send + Sync {
  /// Register an action handler that can send actions for processing if necessary.
  ///
  /// # Arguments
  ///
  /// * `tx` - An unbounded sender that can send actions.
  ///
  /// # Returns
  ///
  /// * `Result<()>` - An Ok result or an error.
  fn register_action_handler(&mut self, _tx: UnboundedSender<Action>) -> Result<()> {
    Ok(())
  }

  /// Handle incoming events and produce actions if necessary.
  ///
  /// # Arguments
  ///
  /// * `event` - An optional event to be processed.
  ///
  /// # Returns
  ///
  /// * `Result<Option<Action>>` - An action to be processed or none.
  async fn handle_events(&mut self, event: Option<Event>) -> Result<Option<Action>> {
    match event {
      Some(Event::Key(key_event)) => self.handle_key_events(key_event).await,
      _ => Ok(None),
    }
  }

  /// Handle key events and produce actions if necessary.
  async fn handle_key_events(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
    Ok(None)
  }

  /// Update the state of the component based on a received action.
  async fn update(&mut self, _action: Action) -> Result<Option<Action>> {
    Ok(None)
  }

  /// Render the component on the screen.
  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()>;
}
