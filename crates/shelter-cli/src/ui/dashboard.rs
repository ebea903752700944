//! Dashboard: full roster on the left, last five added on the right.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Row, Table, TableState},
};
use shelter_core::person::Person;

use crate::dashboard::{Dashboard, Pane};

pub fn draw(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
    .split(area);

  draw_roster(f, cols[0], dashboard);
  draw_recent(f, cols[1], dashboard);
}

// ─── Roster ───────────────────────────────────────────────────────────────────

fn draw_roster(f: &mut Frame, area: Rect, d: &Dashboard) {
  let focused = d.pane == Pane::Roster;

  let mut title = vec![
    Span::raw(" People "),
    badge(
      format!(" healthy {} ({}%) ", d.stats.healthy(), d.stats.healthy_percent),
      Color::Green,
    ),
    Span::raw(" "),
    badge(
      format!(" infected {} ({}%) ", d.stats.infected, d.stats.infected_percent),
      Color::Red,
    ),
    Span::raw(" "),
  ];
  if d.filter_active || !d.filter.is_empty() {
    title.push(Span::styled(
      format!("/{} ", d.filter),
      Style::default().fg(Color::Yellow),
    ));
  }

  let people = d.filtered_people();
  let rows: Vec<Row> = if people.is_empty() {
    vec![no_records()]
  } else {
    people
      .iter()
      .map(|p| {
        Row::new(vec![
          Cell::from(p.name.clone()),
          Cell::from(p.age.to_string()),
          Cell::from(p.blood_type.to_string()),
          status_cell(p),
        ])
      })
      .collect()
  };

  let table = Table::new(rows, [
    Constraint::Min(16),
    Constraint::Length(5),
    Constraint::Length(6),
    Constraint::Length(10),
  ])
  .header(header(["Name", "Age", "Blood", "Status"]))
  .block(pane_block(Line::from(title), focused))
  .row_highlight_style(highlight(focused));

  let mut state = TableState::default();
  if !people.is_empty() {
    state.select(Some(d.roster_cursor));
  }
  f.render_stateful_widget(table, area, &mut state);
}

// ─── Recent ───────────────────────────────────────────────────────────────────

fn draw_recent(f: &mut Frame, area: Rect, d: &Dashboard) {
  let focused = d.pane == Pane::Recent;

  let rows: Vec<Row> = if d.recent.is_empty() {
    vec![no_records()]
  } else {
    d.recent
      .iter()
      .map(|p| Row::new(vec![Cell::from(p.name.clone()), status_cell(p)]))
      .collect()
  };

  let table = Table::new(rows, [Constraint::Min(12), Constraint::Length(10)])
    .header(header(["Name", "Status"]))
    .block(pane_block(Line::from(" Last added "), focused))
    .row_highlight_style(highlight(focused));

  let mut state = TableState::default();
  if !d.recent.is_empty() {
    state.select(Some(d.recent_cursor));
  }
  f.render_stateful_widget(table, area, &mut state);
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn badge(text: String, bg: Color) -> Span<'static> {
  Span::styled(
    text,
    Style::default().fg(Color::Black).bg(bg).add_modifier(Modifier::BOLD),
  )
}

fn status_cell(p: &Person) -> Cell<'static> {
  if p.is_infected {
    Cell::from(Span::styled("infected", Style::default().fg(Color::Red)))
  } else {
    Cell::from(Span::styled("healthy", Style::default().fg(Color::Green)))
  }
}

fn no_records() -> Row<'static> {
  Row::new(vec![Cell::from(Span::styled(
    "No records",
    Style::default().fg(Color::DarkGray),
  ))])
}

fn header<const N: usize>(labels: [&'static str; N]) -> Row<'static> {
  Row::new(labels.map(Cell::from))
    .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
}

fn pane_block(title: Line<'_>, focused: bool) -> Block<'_> {
  let border = if focused { Color::Cyan } else { Color::DarkGray };
  Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border))
}

fn highlight(focused: bool) -> Style {
  if focused {
    Style::default().bg(Color::Cyan).fg(Color::Black)
  } else {
    Style::default().add_modifier(Modifier::DIM | Modifier::REVERSED)
  }
}
