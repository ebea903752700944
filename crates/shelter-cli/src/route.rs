//! Navigation targets.
//!
//! Views are addressed by path, as in a browser: `/` for
//! the dashboard, `/person` for a blank form and `/person/{id}` for editing.

use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
  #[default]
  Dashboard,
  /// The person form; the id is the single optional path parameter.
  Person(Option<Uuid>),
}

/// How a form was opened. Decided once when the form is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
  Create,
  Edit(Uuid),
}

impl FormMode {
  pub fn from_param(id: Option<Uuid>) -> Self { id.map_or(Self::Create, Self::Edit) }

  pub fn id(self) -> Option<Uuid> {
    match self {
      Self::Create => None,
      Self::Edit(id) => Some(id),
    }
  }
}

impl FromStr for Route {
  type Err = anyhow::Error;

  fn from_str(path: &str) -> Result<Self> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
      [] => Ok(Self::Dashboard),
      ["person"] => Ok(Self::Person(None)),
      ["person", id] => {
        let id = Uuid::parse_str(id).map_err(|e| anyhow!("bad person id {id:?}: {e}"))?;
        Ok(Self::Person(Some(id)))
      }
      _ => Err(anyhow!("unknown route {path:?}")),
    }
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Dashboard => f.write_str("/"),
      Self::Person(None) => f.write_str("/person"),
      Self::Person(Some(id)) => write!(f, "/person/{id}"),
    }
  }
}
