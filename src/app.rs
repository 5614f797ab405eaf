use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
  prelude::*,
  widgets::{Block, Borders, Tabs},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
  action::Action,
  components::{Component, ErrorView, InstructionFooter, ListController},
  composition::{Dependencies, make_list, parse_screens},
  config::Config,
  dispatcher::Dispatcher,
  mode::Mode,
  tui::{self, Frame, Tui},
};

const INSTRUCTIONS: [&str; 5] = ["q: quit", "tab: switch list", "↑/↓: move", "enter: select", "r: refresh"];
const ERROR_INSTRUCTIONS: [&str; 2] = ["↑/↓: scroll", "esc: dismiss"];

pub struct App {
  pub lists: Vec<ListController>,
  pub active: usize,
  pub error_view: ErrorView,
  pub footer: InstructionFooter,
  pub status: Option<String>,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub mode: Mode,
  tick_rate: f64,
  frame_rate: f64,
  action_tx: UnboundedSender<Action>,
  action_rx: UnboundedReceiver<Action>,
}

impl App {
  pub fn new(config: &Config, tick_rate: f64, frame_rate: f64) -> Result<Self> {
    let screens = parse_screens(&config.tabs)?;
    let deps = Dependencies::from_config(config)?;
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(action_tx.clone());

    let mut lists: Vec<ListController> =
      screens.into_iter().map(|screen| make_list(screen, &deps, &dispatcher)).collect();
    for list in lists.iter_mut() {
      list.register_action_handler(action_tx.clone())?;
    }
    info!("Starting with tabs: {:?}", lists.iter().map(|list| list.screen()).collect::<Vec<_>>());

    Ok(Self {
      lists,
      active: 0,
      error_view: ErrorView::default(),
      footer: InstructionFooter::default(),
      status: None,
      should_quit: false,
      should_suspend: false,
      mode: Mode::Default,
      tick_rate,
      frame_rate,
      action_tx,
      action_rx,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    let mut tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
    tui.enter()?;

    self.select_tab(0)?;

    loop {
      if let Some(e) = tui.next().await {
        match e {
          tui::Event::Quit => self.send(Action::Quit),
          tui::Event::Tick => self.send(Action::Tick),
          tui::Event::Render => self.send(Action::Render),
          tui::Event::Resize(x, y) => self.send(Action::Resize(x, y)),
          _ => {},
        }
        if let Some(action) = self.handle_event(e).await? {
          self.send(action);
        }
      }

      while let Ok(action) = self.action_rx.try_recv() {
        if !matches!(action, Action::Tick | Action::Render) {
          debug!("{action:?}");
        }

        match action {
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.render(&mut tui)?;
          },
          Action::Render => self.render(&mut tui)?,
          action => self.update(action).await?,
        }
      }

      if self.should_suspend {
        tui.suspend()?;
        self.send(Action::Resume);
        tui = Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate);
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }

  /// Maps a terminal event to an action. Keys the app does not claim go to
  /// the error view while it is shown, otherwise to the active list.
  pub async fn handle_event(&mut self, event: tui::Event) -> Result<Option<Action>> {
    if let tui::Event::Key(key) = event {
      if let Some(action) = self.global_key_action(key) {
        return Ok(Some(action));
      }
    }

    match self.mode {
      Mode::Error => self.error_view.handle_events(Some(event)).await,
      Mode::Default => self.active_list().handle_events(Some(event)).await,
    }
  }

  fn global_key_action(&self, key: KeyEvent) -> Option<Action> {
    if let KeyEvent { code: KeyCode::Char('c' | 'C'), modifiers: KeyModifiers::CONTROL, .. } = key {
      return Some(Action::Quit);
    }
    if self.mode == Mode::Error {
      return None;
    }

    match key {
      KeyEvent { code: KeyCode::Char('q'), .. } => Some(Action::Quit),
      KeyEvent { code: KeyCode::Char('z' | 'Z'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Suspend),
      KeyEvent { code: KeyCode::Tab, .. } => Some(Action::NextTab),
      KeyEvent { code: KeyCode::BackTab, .. } => Some(Action::PreviousTab),
      _ => None,
    }
  }

  /// Applies every action other than drawing.
  pub async fn update(&mut self, action: Action) -> Result<()> {
    match action {
      Action::Quit => self.should_quit = true,
      Action::Suspend => self.should_suspend = true,
      Action::Resume => self.should_suspend = false,
      Action::NextTab => self.select_tab((self.active + 1) % self.lists.len())?,
      Action::PreviousTab => self.select_tab((self.active + self.lists.len() - 1) % self.lists.len())?,
      Action::Error(message) => {
        self.error_view.set_message(message);
        self.mode = Mode::Error;
        self.send(Action::Render);
      },
      Action::ExitError => {
        self.mode = Mode::Default;
        self.send(Action::Render);
      },
      Action::ItemSelected(item) => {
        info!("Selected {}", item.summary());
        self.status = Some(item.summary());
        self.send(Action::Render);
      },
      Action::LoadCompleted { screen, request, result } => {
        let completed = Action::LoadCompleted { screen, request, result };
        match self.lists.iter_mut().find(|list| list.screen() == screen) {
          Some(list) => {
            if let Some(next) = list.update(completed).await? {
              self.send(next);
            }
          },
          None => debug!("No list shows {}, dropping its completion", screen),
        }
      },
      action => {
        if let Some(next) = self.active_list().update(action).await? {
          self.send(next);
        }
      },
    }
    Ok(())
  }

  fn select_tab(&mut self, index: usize) -> Result<()> {
    self.active = index;
    self.status = None;
    self.active_list().appear()?;
    self.send(Action::Render);
    Ok(())
  }

  fn active_list(&mut self) -> &mut ListController {
    &mut self.lists[self.active]
  }

  fn send(&self, action: Action) {
    if let Err(e) = self.action_tx.send(action) {
      error!("Failed to send action: {}", e);
    }
  }

  fn render(&mut self, tui: &mut Tui) -> Result<()> {
    tui.draw(|f| {
      if let Err(e) = self.draw(f) {
        error!("Failed to draw: {:?}", e);
        self.send(Action::Error(format!("Failed to draw: {:?}", e)));
      }
    })?;
    Ok(())
  }

  pub fn draw(&mut self, f: &mut Frame<'_>) -> Result<()> {
    let [header, body, footer] =
      Layout::vertical([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)]).areas(f.area());

    let titles: Vec<&str> = self.lists.iter().map(|list| list.title()).collect();
    let tabs = Tabs::new(titles)
      .block(Block::default().borders(Borders::ALL))
      .select(self.active)
      .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow));
    f.render_widget(tabs, header);

    match self.mode {
      Mode::Default => {
        self.lists[self.active].draw(f, body)?;
        self.footer.render(f, footer, &INSTRUCTIONS, self.status.as_deref());
      },
      Mode::Error => {
        self.error_view.draw(f, body)?;
        self.footer.render(f, footer, &ERROR_INSTRUCTIONS, None);
      },
    }
    Ok(())
  }
}
