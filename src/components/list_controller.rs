use std::{sync::Arc, time::SystemTime};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use super::Component;
use crate::{
  action::Action,
  composition::Screen,
  dispatcher::Dispatcher,
  error::Error,
  services::{ItemService, Row},
  tui::Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingOperation {
  None,
  Loading(SystemTime),
}

/// How many times a failed refresh is re-issued before the failure is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
  pub should_retry: bool,
  pub max_retries: u32,
}

impl RetryPolicy {
  pub fn disabled() -> Self {
    Self::default()
  }

  pub fn retry(max_retries: u32) -> Self {
    Self { should_retry: true, max_retries }
  }
}

/// Drives one list screen: loads rows from its service, tracks the selection
/// and renders the result.
///
/// Loads are started with [`ListController::refresh`] and complete as
/// [`Action::LoadCompleted`] on the application loop. Each refresh is tagged
/// with a sequence number and only the completion of the newest one is applied.
pub struct ListController {
  screen: Screen,
  service: Arc<dyn ItemService>,
  retry_policy: RetryPolicy,
  rows: Vec<Row>,
  loading: LoadingOperation,
  retries_used: u32,
  request: u64,
  last_error: Option<Error>,
  list_state: ListState,
  dispatcher: Option<Dispatcher>,
}

impl ListController {
  pub fn new(screen: Screen, service: Arc<dyn ItemService>, retry_policy: RetryPolicy) -> Self {
    Self {
      screen,
      service,
      retry_policy,
      rows: Vec::new(),
      loading: LoadingOperation::None,
      retries_used: 0,
      request: 0,
      last_error: None,
      list_state: ListState::default(),
      dispatcher: None,
    }
  }

  pub fn screen(&self) -> Screen {
    self.screen
  }

  pub fn title(&self) -> &'static str {
    self.screen.title()
  }

  pub fn rows(&self) -> &[Row] {
    &self.rows
  }

  pub fn retry_policy(&self) -> RetryPolicy {
    self.retry_policy
  }

  pub fn is_refreshing(&self) -> bool {
    matches!(self.loading, LoadingOperation::Loading(_))
  }

  pub fn retries_used(&self) -> u32 {
    self.retries_used
  }

  pub fn last_error(&self) -> Option<&Error> {
    self.last_error.as_ref()
  }

  pub fn selected_row(&self) -> Option<&Row> {
    self.list_state.selected().and_then(|index| self.rows.get(index))
  }

  /// Loads the list the first time it is shown.
  pub fn appear(&mut self) -> Result<(), Error> {
    if self.rows.is_empty() && !self.is_refreshing() {
      self.refresh()
    } else {
      Ok(())
    }
  }

  /// Starts a load. The outcome arrives later as [`Action::LoadCompleted`].
  pub fn refresh(&mut self) -> Result<(), Error> {
    let dispatcher = self
      .dispatcher
      .clone()
      .ok_or_else(|| Error::Configuration(format!("{} list was refreshed before it was registered", self.screen)))?;

    self.request += 1;
    self.loading = LoadingOperation::Loading(SystemTime::now());

    let screen = self.screen;
    let request = self.request;
    let service = Arc::clone(&self.service);
    debug!("Refreshing {} list, request {}", screen, request);
    dispatcher.run(async move { service.load_items().await }, move |result| Action::LoadCompleted {
      screen,
      request,
      result,
    });
    Ok(())
  }

  /// Applies the outcome of a load. Completions of superseded requests are dropped.
  pub fn handle_load_result(
    &mut self,
    request: u64,
    result: Result<Vec<Row>, Error>,
  ) -> Result<Option<Action>, Error> {
    if request != self.request {
      debug!("Discarding stale {} result for request {}, current is {}", self.screen, request, self.request);
      return Ok(None);
    }

    match result {
      Ok(rows) => {
        info!("Loaded {} rows for {} list", rows.len(), self.screen);
        self.rows = rows;
        self.retries_used = 0;
        self.last_error = None;
        self.loading = LoadingOperation::None;
        self.clamp_selection();
        Ok(Some(Action::Render))
      },
      Err(err) if err.is_fatal() => {
        self.loading = LoadingOperation::None;
        Err(err)
      },
      Err(err) => {
        if self.retry_policy.should_retry && self.retries_used < self.retry_policy.max_retries {
          self.retries_used += 1;
          warn!("Retrying {} list after error: {} ({}/{})", self.screen, err, self.retries_used, self.retry_policy.max_retries);
          self.refresh()?;
          return Ok(None);
        }

        error!("Failed to load {} list: {}", self.screen, err);
        self.retries_used = 0;
        self.loading = LoadingOperation::None;
        let message = err.to_string();
        self.last_error = Some(err);
        Ok(Some(Action::Error(message)))
      },
    }
  }

  pub fn select_next(&mut self) {
    if self.rows.is_empty() {
      return;
    }
    let next = match self.list_state.selected() {
      Some(index) if index + 1 < self.rows.len() => index + 1,
      _ => 0,
    };
    self.list_state.select(Some(next));
  }

  pub fn select_previous(&mut self) {
    if self.rows.is_empty() {
      return;
    }
    let previous = match self.list_state.selected() {
      Some(index) if index > 0 => index - 1,
      _ => self.rows.len() - 1,
    };
    self.list_state.select(Some(previous));
  }

  pub fn select_current(&self) {
    if let Some(row) = self.selected_row() {
      row.select();
    }
  }

  fn clamp_selection(&mut self) {
    let selected = match self.list_state.selected() {
      _ if self.rows.is_empty() => None,
      Some(index) => Some(index.min(self.rows.len() - 1)),
      None => Some(0),
    };
    self.list_state.select(selected);
  }

  fn block_title(&self) -> String {
    match self.loading {
      LoadingOperation::Loading(time) => format!("{} - Refreshing... ({})", self.title(), format_time_elapsed(time)),
      LoadingOperation::None => self.title().to_string(),
    }
  }
}

#[async_trait::async_trait]
impl Component for ListController {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> color_eyre::Result<()> {
    self.dispatcher = Some(Dispatcher::new(tx));
    Ok(())
  }

  async fn handle_key_events(&mut self, key: KeyEvent) -> color_eyre::Result<Option<Action>> {
    let action = match key.code {
      KeyCode::Up => Some(Action::SelectPrevious),
      KeyCode::Down => Some(Action::SelectNext),
      KeyCode::Enter => Some(Action::SelectCurrent),
      KeyCode::Char('r') => Some(Action::Refresh),
      _ => None,
    };
    Ok(action)
  }

  async fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    let next = match action {
      Action::Refresh => {
        self.retries_used = 0;
        self.refresh()?;
        Some(Action::Render)
      },
      Action::LoadCompleted { screen, request, result } if screen == self.screen => {
        self.handle_load_result(request, result)?
      },
      Action::SelectNext => {
        self.select_next();
        Some(Action::Render)
      },
      Action::SelectPrevious => {
        self.select_previous();
        Some(Action::Render)
      },
      Action::SelectCurrent => {
        self.select_current();
        None
      },
      _ => None,
    };
    Ok(next)
  }

  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> color_eyre::Result<()> {
    let items: Vec<ListItem> = self
      .rows
      .iter()
      .map(|row| {
        ListItem::new(vec![
          Line::from(Span::styled(row.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
          Line::from(Span::styled(row.subtitle.clone(), Style::default().fg(Color::Gray))),
        ])
      })
      .collect();

    let list = List::new(items)
      .block(Block::default().title(self.block_title()).borders(Borders::ALL))
      .style(Style::default().fg(Color::White))
      .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
      .highlight_symbol("→ ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
    Ok(())
  }
}

fn format_time_elapsed(time: SystemTime) -> String {
  match time.elapsed() {
    Ok(elapsed) => format!("{:.1}s", elapsed.as_secs_f64()),
    Err(err) => {
      warn!("Failed to get system time {}", err);
      String::from("xs")
    },
  }
}
