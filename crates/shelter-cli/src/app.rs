//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shelter_core::person::PersonPatch;
use uuid::Uuid;

use crate::{
  client::ApiClient,
  dashboard::{Dashboard, Pane},
  form::{FormAction, PersonForm, Submission},
  route::{FormMode, Route},
  toast::Toasts,
};

// ─── Notification text ────────────────────────────────────────────────────────

const UPDATED: &str = "Person updated successfully";
const UPDATE_FAILED: &str = "Error updating person. Try again";
const CREATED: &str = "Person created successfully";
const SAVE_FAILED: &str = "Error updating/creating person. Try again";
const REMOVED: &str = "Person removed successfully";
const REMOVE_FAILED: &str = "Error removing person. Try again";

// ─── View ─────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum View {
  Dashboard,
  Form(PersonForm),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Which view owns the body and the keyboard.
  pub view:      View,
  /// Dashboard data. Kept while the form is open and refetched on return.
  pub dashboard: Dashboard,
  pub toasts:    Toasts,
  /// Shared HTTP client.
  pub client:    Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      view:      View::Dashboard,
      dashboard: Dashboard::default(),
      toasts:    Toasts::default(),
      client:    Arc::new(client),
    }
  }

  /// The route of the current view.
  pub fn route(&self) -> Route {
    match &self.view {
      View::Dashboard => Route::Dashboard,
      View::Form(form) => Route::Person(form.mode.id()),
    }
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Switch to `route`, loading whatever the new view shows on entry.
  pub async fn navigate(&mut self, route: Route) {
    tracing::debug!(%route, "navigate");
    match route {
      Route::Dashboard => {
        self.view = View::Dashboard;
        self.refresh().await;
      }
      Route::Person(id) => {
        let mode = FormMode::from_param(id);
        let mut form = PersonForm::new(mode);
        if let FormMode::Edit(id) = mode {
          match self.client.get_person(id).await {
            Ok(Some(person)) => form.load(&person),
            Ok(None) => self.toasts.failure(format!("No person with id {id}")),
            Err(e) => self.toasts.failure(format!("Error loading person: {e}")),
          }
        }
        self.view = View::Form(form);
      }
    }
  }

  /// Re-fetch both dashboard lists concurrently.
  pub async fn refresh(&mut self) {
    let (people, recent) =
      tokio::join!(self.client.list_people(), self.client.list_recent());

    match people {
      Ok(people) => self.dashboard.set_people(people),
      Err(e) => {
        tracing::warn!("loading roster: {e:#}");
        self.toasts.failure(format!("Error loading people: {e}"));
      }
    }
    match recent {
      Ok(recent) => self.dashboard.set_recent(recent),
      Err(e) => {
        tracing::warn!("loading recent: {e:#}");
        self.toasts.failure(format!("Error loading recent people: {e}"));
      }
    }
  }

  // ── Dashboard actions ─────────────────────────────────────────────────────

  /// Flip the infection flag of the selected row in either table.
  pub async fn toggle_infected(&mut self) {
    let Some((id, infected)) =
      self.dashboard.selected().map(|p| (p.id, p.is_infected))
    else {
      return;
    };

    match self
      .client
      .update_person(id, &PersonPatch::infected(!infected))
      .await
    {
      Ok(_) => self.toasts.success(UPDATED),
      Err(_) => self.toasts.failure(UPDATE_FAILED),
    }
    self.refresh().await;
  }

  /// Delete the selected roster row.
  pub async fn delete_selected(&mut self) {
    if self.dashboard.pane != Pane::Roster {
      return;
    }
    let Some(id) = self.dashboard.selected().map(|p| p.id) else {
      return;
    };
    self.delete(id).await;
    self.refresh().await;
  }

  async fn delete(&mut self, id: Uuid) -> bool {
    match self.client.delete_person(id).await {
      Ok(()) => {
        self.toasts.success(REMOVED);
        true
      }
      Err(_) => {
        self.toasts.failure(REMOVE_FAILED);
        false
      }
    }
  }

  // ── Form actions ──────────────────────────────────────────────────────────

  /// Validate and send the open form. Returns to the dashboard on success.
  pub async fn submit_form(&mut self) {
    let View::Form(form) = &mut self.view else {
      return;
    };
    // Field errors are rendered from the form itself; nothing is sent.
    let Ok(submission) = form.submission() else {
      return;
    };

    let result = match &submission {
      Submission::Create(input) => self.client.create_person(input).await.map(|_| CREATED),
      Submission::Update(id, patch) => {
        self.client.update_person(*id, patch).await.map(|_| UPDATED)
      }
    };

    match result {
      Ok(message) => {
        self.toasts.success(message);
        self.navigate(Route::Dashboard).await;
      }
      Err(_) => self.toasts.failure(SAVE_FAILED),
    }
  }

  /// Delete the record the form is editing. No-op in create mode.
  pub async fn delete_from_form(&mut self) {
    let View::Form(form) = &self.view else {
      return;
    };
    let Some(id) = form.mode.id() else {
      return;
    };
    if self.delete(id).await {
      self.navigate(Route::Dashboard).await;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // Global: header navigation.
    match key.code {
      KeyCode::F(1) => {
        self.navigate(Route::Dashboard).await;
        return Ok(true);
      }
      KeyCode::F(2) => {
        self.navigate(Route::Person(None)).await;
        return Ok(true);
      }
      _ => {}
    }

    match self.view {
      View::Dashboard if self.dashboard.filter_active => {
        self.handle_filter_key(key);
        Ok(true)
      }
      View::Dashboard => self.handle_dashboard_key(key).await,
      View::Form(_) => {
        self.handle_form_key(key).await;
        Ok(true)
      }
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.dashboard.clear_filter(),
      KeyCode::Enter => self.dashboard.commit_filter(),
      KeyCode::Backspace => self.dashboard.pop_filter(),
      KeyCode::Char(c) => self.dashboard.push_filter(c),
      _ => {}
    }
  }

  async fn handle_dashboard_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Tab | KeyCode::BackTab => self.dashboard.switch_pane(),
      KeyCode::Down | KeyCode::Char('j') => self.dashboard.move_down(),
      KeyCode::Up | KeyCode::Char('k') => self.dashboard.move_up(),

      // Row actions
      KeyCode::Char('i') | KeyCode::Char(' ') => self.toggle_infected().await,
      KeyCode::Enter | KeyCode::Char('e') => {
        if self.dashboard.pane == Pane::Roster {
          if let Some(id) = self.dashboard.selected().map(|p| p.id) {
            self.navigate(Route::Person(Some(id))).await;
          }
        }
      }
      KeyCode::Char('d') | KeyCode::Delete => self.delete_selected().await,

      // Lists
      KeyCode::Char('n') => self.navigate(Route::Person(None)).await,
      KeyCode::Char('r') => self.refresh().await,
      KeyCode::Char('/') => self.dashboard.start_filter(),
      KeyCode::Esc => self.dashboard.clear_filter(),

      _ => {}
    }
    Ok(true)
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    let View::Form(form) = &mut self.view else {
      return;
    };
    match form.handle_key(key) {
      FormAction::None => {}
      FormAction::Submit => self.submit_form().await,
      FormAction::Delete => self.delete_from_form().await,
      FormAction::Cancel => self.navigate(Route::Dashboard).await,
    }
  }
}
