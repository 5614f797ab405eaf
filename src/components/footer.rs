use ratatui::{
  layout::Rect,
  style::{Color, Style},
  widgets::{Block, Borders, Paragraph},
};

use crate::tui::Frame;

#[derive(Default)]
pub struct InstructionFooter {}

impl InstructionFooter {
  /// Renders the key instructions, followed by `status` when there is one.
  pub fn render(&self, frame: &mut Frame<'_>, area: Rect, instructions: &[&str], status: Option<&str>) {
    let mut text = instructions.join(" | ");
    if let Some(status) = status {
      text = format!("{} | {}", text, status);
    }
    let paragraph =
      Paragraph::new(text).block(Block::default().borders(Borders::ALL)).style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
  }
}
