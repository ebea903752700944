//! TUI rendering: orchestrates all panes.

pub mod dashboard;
pub mod form;

use std::time::Instant;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::{
  app::{App, View},
  toast::ToastKind,
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match &app.view {
    View::Dashboard => dashboard::draw(f, rows[1], &app.dashboard),
    View::Form(form) => form::draw(f, rows[1], form),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " Shelter profiler",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let nav = Span::styled(
    format!("  [F1] Dashboard  [F2] New person   {}", app.route()),
    Style::default().fg(Color::Gray),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Simple left-right header: pad the middle.
  let used = (left.width() + nav.width() + right.width()) as u16;
  let pad = area.width.saturating_sub(used);

  let line = Line::from(vec![
    left,
    nav,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.view {
    View::Dashboard if app.dashboard.filter_active => (
      "FILTER",
      "Type to filter  Esc clear  Enter keep",
    ),
    View::Dashboard => (
      "DASHBOARD",
      "↑↓/jk move  Tab table  i toggle  e edit  d delete  n new  / filter  r reload  q quit",
    ),
    View::Form(form) if form.is_edit() => (
      "EDIT",
      "Tab/↑↓ field  ←→/Space change  Enter Update  ^D Delete  Esc back",
    ),
    View::Form(_) => (
      "REGISTER",
      "Tab/↑↓ field  ←→/Space change  Enter Register  Esc back",
    ),
  };

  let (message, message_style) = match app.toasts.current(Instant::now()) {
    Some(toast) => {
      let color = match toast.kind {
        ToastKind::Success => Color::Green,
        ToastKind::Failure => Color::Red,
      };
      (
        toast.message.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      )
    }
    None => (hints.to_string(), Style::default().fg(Color::DarkGray)),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let message_span = Span::styled(format!("  {message}"), message_style);

  let line = Line::from(vec![mode_span, message_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
