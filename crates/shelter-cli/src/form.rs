//! Person form state: field buffers, focus, client-side validation.
//!
//! Nothing here talks to the network. The app turns a successful
//! [`PersonForm::submission`] into a create or update request.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shelter_core::{
  person::{BloodType, NewPerson, Person, PersonPatch},
  validate::OBSERVATION_MAX_LEN,
};
use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::route::FormMode;

// ─── Fields ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Name,
  Age,
  BloodType,
  Skills,
  IsInjured,
  IsInfected,
  CanWork,
  Observation,
}

impl Field {
  /// Tab order.
  pub const ALL: [Field; 8] = [
    Field::Name,
    Field::Age,
    Field::BloodType,
    Field::Skills,
    Field::IsInjured,
    Field::IsInfected,
    Field::CanWork,
    Field::Observation,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::Name => "Name",
      Self::Age => "Age",
      Self::BloodType => "Blood type",
      Self::Skills => "Skills",
      Self::IsInjured => "Is injured?",
      Self::IsInfected => "Is infected?",
      Self::CanWork => "Can work?",
      Self::Observation => "Observation",
    }
  }

  fn index(self) -> usize {
    Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
  }

  fn next(self) -> Self { Self::ALL[(self.index() + 1) % Self::ALL.len()] }

  fn prev(self) -> Self {
    Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

// ─── Validation ───────────────────────────────────────────────────────────────

/// A field that fails the form's own checks; no request is sent while any of
/// these are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
  NameRequired,
  AgeRequired,
  AgeNotPositive,
  SkillsRequired,
}

impl FormError {
  pub fn field(self) -> Field {
    match self {
      Self::NameRequired => Field::Name,
      Self::AgeRequired | Self::AgeNotPositive => Field::Age,
      Self::SkillsRequired => Field::Skills,
    }
  }

  pub fn message(self) -> &'static str {
    match self {
      Self::NameRequired => "Name is required",
      Self::AgeRequired => "Age is required",
      Self::AgeNotPositive => "Age needs to be positive",
      Self::SkillsRequired => "Skills is required",
    }
  }
}

/// What a validated form asks the server to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
  Create(NewPerson),
  Update(Uuid, PersonPatch),
}

/// What a key press on the form asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
  None,
  Submit,
  Delete,
  Cancel,
}

// ─── Form ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PersonForm {
  pub mode:        FormMode,
  pub name:        String,
  /// Raw text; parsed on submit.
  pub age:         String,
  pub blood_type:  BloodType,
  pub skills:      String,
  pub is_injured:  bool,
  pub is_infected: bool,
  pub can_work:    bool,
  pub observation: String,
  pub focus:       Field,
  /// Errors from the last submit attempt.
  pub errors:      Vec<FormError>,
}

impl PersonForm {
  /// A form holding the fixed defaults.
  pub fn new(mode: FormMode) -> Self {
    Self {
      mode,
      name: String::new(),
      age: "0".into(),
      blood_type: BloodType::default(),
      skills: String::new(),
      is_injured: false,
      is_infected: false,
      can_work: false,
      observation: String::new(),
      focus: Field::Name,
      errors: Vec::new(),
    }
  }

  /// Overwrite every field with `person`'s values. The mode is unchanged.
  pub fn load(&mut self, person: &Person) {
    self.name = person.name.clone();
    self.age = person.age.to_string();
    self.blood_type = person.blood_type;
    self.skills = person.skills.clone();
    self.is_injured = person.is_injured;
    self.is_infected = person.is_infected;
    self.can_work = person.can_work;
    self.observation = person.observation.clone().unwrap_or_default();
    self.errors.clear();
  }

  pub fn is_edit(&self) -> bool { matches!(self.mode, FormMode::Edit(_)) }

  pub fn title(&self) -> &'static str {
    if self.is_edit() { "Edit person" } else { "Register person" }
  }

  pub fn submit_label(&self) -> &'static str {
    if self.is_edit() { "Update" } else { "Register" }
  }

  /// The errors currently shown next to `field`.
  pub fn errors_for(&self, field: Field) -> impl Iterator<Item = FormError> + '_ {
    self.errors.iter().copied().filter(move |e| e.field() == field)
  }

  // ── Validation ────────────────────────────────────────────────────────────

  pub fn validate(&self) -> Vec<FormError> {
    let mut errors = Vec::new();
    if self.name.trim().is_empty() {
      errors.push(FormError::NameRequired);
    }
    match self.age.trim().parse::<i32>() {
      Err(_) => errors.push(FormError::AgeRequired),
      Ok(age) if age <= 0 => errors.push(FormError::AgeNotPositive),
      Ok(_) => {}
    }
    if self.skills.trim().is_empty() {
      errors.push(FormError::SkillsRequired);
    }
    errors
  }

  /// Validate and build the request for the current mode. On failure the
  /// errors are also kept on the form for display.
  pub fn submission(&mut self) -> Result<Submission, Vec<FormError>> {
    self.errors = self.validate();
    if !self.errors.is_empty() {
      return Err(self.errors.clone());
    }
    let age = self.age.trim().parse::<i32>().map_err(|_| vec![FormError::AgeRequired])?;

    Ok(match self.mode {
      FormMode::Create => Submission::Create(NewPerson {
        name: self.name.clone(),
        age,
        blood_type: self.blood_type,
        skills: self.skills.clone(),
        is_injured: self.is_injured,
        is_infected: self.is_infected,
        can_work: self.can_work,
        observation: Some(self.observation.clone()),
      }),
      FormMode::Edit(id) => Submission::Update(id, PersonPatch {
        name:        Some(self.name.clone()),
        age:         Some(age),
        blood_type:  Some(self.blood_type),
        skills:      Some(self.skills.clone()),
        is_injured:  Some(self.is_injured),
        is_infected: Some(self.is_infected),
        can_work:    Some(self.can_work),
        observation: Some(Some(self.observation.clone())),
      }),
    })
  }

  // ── Editing ───────────────────────────────────────────────────────────────

  /// Apply a key press to the focused field.
  pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
      return match key.code {
        KeyCode::Char('s') => FormAction::Submit,
        KeyCode::Char('d') if self.is_edit() => FormAction::Delete,
        _ => FormAction::None,
      };
    }

    match key.code {
      KeyCode::Esc => return FormAction::Cancel,
      KeyCode::Enter => return FormAction::Submit,
      KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
      KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
      KeyCode::Left => self.cycle_blood_type(false),
      KeyCode::Right => self.cycle_blood_type(true),
      KeyCode::Backspace => {
        if let Some(buf) = self.text_buffer() {
          buf.pop();
        }
      }
      KeyCode::Char(c) => self.type_char(c),
      _ => {}
    }
    FormAction::None
  }

  fn text_buffer(&mut self) -> Option<&mut String> {
    match self.focus {
      Field::Name => Some(&mut self.name),
      Field::Age => Some(&mut self.age),
      Field::Skills => Some(&mut self.skills),
      Field::Observation => Some(&mut self.observation),
      _ => None,
    }
  }

  fn type_char(&mut self, c: char) {
    match self.focus {
      Field::IsInjured if c == ' ' => self.is_injured = !self.is_injured,
      Field::IsInfected if c == ' ' => self.is_infected = !self.is_infected,
      Field::CanWork if c == ' ' => self.can_work = !self.can_work,
      Field::BloodType if c == ' ' => self.cycle_blood_type(true),
      Field::Age if !(c.is_ascii_digit() || (c == '-' && self.age.is_empty())) => {}
      Field::Observation if self.observation.chars().count() >= OBSERVATION_MAX_LEN => {}
      _ => {
        if let Some(buf) = self.text_buffer() {
          buf.push(c);
        }
      }
    }
  }

  fn cycle_blood_type(&mut self, forward: bool) {
    if self.focus != Field::BloodType {
      return;
    }
    let order: Vec<BloodType> = BloodType::iter().collect();
    let i = order.iter().position(|b| *b == self.blood_type).unwrap_or(0);
    let next = if forward { i + 1 } else { i + order.len() - 1 };
    self.blood_type = order[next % order.len()];
  }
}
