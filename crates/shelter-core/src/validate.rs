//! Field rules shared by create and update.

use crate::{Error, Result};

/// Longest accepted `observation`, in characters.
pub const OBSERVATION_MAX_LEN: usize = 244;

/// A required text field: present and not just whitespace.
pub fn required_text(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::Required(field));
  }
  Ok(())
}

/// `observation` is optional but capped.
pub fn observation(value: Option<&str>) -> Result<()> {
  match value {
    Some(v) if v.chars().count() > OBSERVATION_MAX_LEN => Err(Error::TooLong {
      field: "observation",
      max:   OBSERVATION_MAX_LEN,
    }),
    _ => Ok(()),
  }
}
