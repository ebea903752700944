//! The uniform `{ success, data?, error? }` wrapper used on the wire.
//!
//! Produced by the API and consumed by the terminal client.

use serde::{Deserialize, Serialize};

/// Response wrapper for every API call.
///
/// `data` is omitted when there is nothing to return (a read of a missing id,
/// a delete, any failure). `error` is only present when `success` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(default = "none", skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error:   Option<ErrorBody>,
}

// `#[serde(default)]` on a generic field would demand `T: Default`.
fn none<T>() -> Option<T> { None }

impl<T> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self { success: true, data: Some(data), error: None }
  }

  /// Success with nothing attached.
  pub fn empty() -> Self {
    Self { success: true, data: None, error: None }
  }

  pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self {
      success: false,
      data:    None,
      error:   Some(ErrorBody { kind, message: message.into() }),
    }
  }
}

/// Why a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  /// The id in the path does not resolve to a record.
  NotFound,
  /// The body is missing a required field, has a mistyped field, or breaks
  /// a field rule.
  Validation,
  /// The request itself is malformed (bad id, unreadable body, unknown
  /// route).
  BadRequest,
  MethodNotAllowed,
  /// The store failed for any other reason.
  StoreFault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
  pub kind:    ErrorKind,
  pub message: String,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn empty_success_has_no_data_key() {
    let v = serde_json::to_value(Envelope::<u8>::empty()).unwrap();
    assert_eq!(v, json!({ "success": true }));
  }

  #[test]
  fn failure_carries_kind() {
    let v = serde_json::to_value(Envelope::<u8>::failure(ErrorKind::NotFound, "gone"))
      .unwrap();
    assert_eq!(
      v,
      json!({ "success": false, "error": { "kind": "not_found", "message": "gone" } })
    );
  }

  #[test]
  fn bare_failure_still_parses() {
    let env: Envelope<Vec<u8>> = serde_json::from_value(json!({ "success": false })).unwrap();
    assert!(!env.success);
    assert_eq!(env.data, None);
    assert_eq!(env.error, None);
  }
}
