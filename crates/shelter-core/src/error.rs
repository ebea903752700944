//! Error types for `shelter-core`.

use thiserror::Error;

/// A record that breaks one of the roster's field rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("{0} is required")]
  Required(&'static str),

  #[error("{field} must be at most {max} characters")]
  TooLong { field: &'static str, max: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
