//! Person form: one line per field, errors under the field they belong to.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use shelter_core::validate::OBSERVATION_MAX_LEN;

use crate::form::{Field, PersonForm};

const LABEL_WIDTH: usize = 14;

pub fn draw(f: &mut Frame, area: Rect, form: &PersonForm) {
  let block = Block::default()
    .title(format!(" {} ", form.title()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines: Vec<Line> = Vec::new();
  for field in Field::ALL {
    lines.push(field_line(form, field));
    for error in form.errors_for(field) {
      lines.push(Line::from(Span::styled(
        format!("{:LABEL_WIDTH$}  {}", "", error.message()),
        Style::default().fg(Color::Red),
      )));
    }
  }

  lines.push(Line::default());
  let mut actions = vec![Span::styled(
    format!(" {} ", form.submit_label()),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Green)
      .add_modifier(Modifier::BOLD),
  )];
  if form.is_edit() {
    actions.push(Span::raw("  "));
    actions.push(Span::styled(
      " Delete ",
      Style::default()
        .fg(Color::Black)
        .bg(Color::Red)
        .add_modifier(Modifier::BOLD),
    ));
  }
  lines.push(Line::from(actions));

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn field_line(form: &PersonForm, field: Field) -> Line<'static> {
  let focused = form.focus == field;
  let value = match field {
    Field::Name => form.name.clone(),
    Field::Age => form.age.clone(),
    Field::BloodType => format!("‹ {} ›", form.blood_type),
    Field::Skills => form.skills.clone(),
    Field::IsInjured => checkbox(form.is_injured),
    Field::IsInfected => checkbox(form.is_infected),
    Field::CanWork => checkbox(form.can_work),
    Field::Observation => format!(
      "{}  ({}/{OBSERVATION_MAX_LEN})",
      form.observation,
      form.observation.chars().count()
    ),
  };

  let label_style = if focused {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Gray)
  };
  let value_style = if focused {
    Style::default().add_modifier(Modifier::UNDERLINED)
  } else {
    Style::default()
  };
  let cursor = if focused { "▏" } else { "" };

  Line::from(vec![
    Span::styled(format!("{:>LABEL_WIDTH$}  ", field.label()), label_style),
    Span::styled(value, value_style),
    Span::raw(cursor),
  ])
}

fn checkbox(checked: bool) -> String {
  if checked { "[x]".into() } else { "[ ]".into() }
}
