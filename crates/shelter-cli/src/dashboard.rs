//! Dashboard state: the full roster, the recent five, and the aggregates.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use shelter_core::{person::Person, stats::InfectionStats};

/// Which table has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
  #[default]
  Roster,
  Recent,
}

#[derive(Debug, Default)]
pub struct Dashboard {
  /// Full roster as last fetched.
  pub people:        Vec<Person>,
  /// Last five added, newest first.
  pub recent:        Vec<Person>,
  /// Always computed over the unfiltered `people`.
  pub stats:         InfectionStats,
  pub pane:          Pane,
  /// Cursor within the *filtered* roster.
  pub roster_cursor: usize,
  pub recent_cursor: usize,
  pub filter:        String,
  /// Whether keys are going into `filter`.
  pub filter_active: bool,
}

impl Dashboard {
  /// Replace the roster and recompute the aggregates.
  pub fn set_people(&mut self, people: Vec<Person>) {
    self.stats = InfectionStats::from_people(&people);
    self.people = people;
    self.clamp_cursors();
  }

  pub fn set_recent(&mut self, recent: Vec<Person>) {
    self.recent = recent;
    self.clamp_cursors();
  }

  /// Roster rows matching the current filter query.
  pub fn filtered_people(&self) -> Vec<&Person> {
    if self.filter.is_empty() {
      return self.people.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .people
      .iter()
      .filter(|p| matcher.fuzzy_match(&p.name, &self.filter).is_some())
      .collect()
  }

  /// The row under the cursor of the focused table.
  pub fn selected(&self) -> Option<&Person> {
    match self.pane {
      Pane::Roster => self.filtered_people().get(self.roster_cursor).copied(),
      Pane::Recent => self.recent.get(self.recent_cursor),
    }
  }

  pub fn switch_pane(&mut self) {
    self.pane = match self.pane {
      Pane::Roster => Pane::Recent,
      Pane::Recent => Pane::Roster,
    };
  }

  pub fn move_down(&mut self) {
    let len = self.focused_len();
    let cursor = self.cursor_mut();
    if *cursor + 1 < len {
      *cursor += 1;
    }
  }

  pub fn move_up(&mut self) {
    let cursor = self.cursor_mut();
    *cursor = cursor.saturating_sub(1);
  }

  // ── Filter ────────────────────────────────────────────────────────────────

  pub fn start_filter(&mut self) {
    self.pane = Pane::Roster;
    self.filter_active = true;
    self.filter.clear();
    self.roster_cursor = 0;
  }

  pub fn push_filter(&mut self, c: char) {
    self.filter.push(c);
    self.roster_cursor = 0;
  }

  pub fn pop_filter(&mut self) {
    self.filter.pop();
    self.roster_cursor = 0;
  }

  /// Leave filter input, keeping the query.
  pub fn commit_filter(&mut self) { self.filter_active = false; }

  /// Leave filter input and drop the query.
  pub fn clear_filter(&mut self) {
    self.filter_active = false;
    self.filter.clear();
    self.roster_cursor = 0;
  }

  // ── Cursor helpers ────────────────────────────────────────────────────────

  fn focused_len(&self) -> usize {
    match self.pane {
      Pane::Roster => self.filtered_people().len(),
      Pane::Recent => self.recent.len(),
    }
  }

  fn cursor_mut(&mut self) -> &mut usize {
    match self.pane {
      Pane::Roster => &mut self.roster_cursor,
      Pane::Recent => &mut self.recent_cursor,
    }
  }

  fn clamp_cursors(&mut self) {
    let roster_len = self.filtered_people().len();
    self.roster_cursor = self.roster_cursor.min(roster_len.saturating_sub(1));
    self.recent_cursor = self.recent_cursor.min(self.recent.len().saturating_sub(1));
  }
}
