//! The `PersonStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `shelter-store-sqlite`). Higher layers (`shelter-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::person::{NewPerson, Person, PersonPatch};

/// How many records the "recently added" view returns.
pub const RECENT_LIMIT: usize = 5;

/// Abstraction over the document collection holding the roster.
///
/// Each method is a single store operation; the backend owns the atomicity of
/// that one write. Inputs are assumed to be validated by the caller.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new person under a freshly generated id.
  fn insert_person(
    &self,
    input: NewPerson,
    created_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Every person, in storage order.
  fn list_people(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// At most `limit` people, newest `created_at` first. Ties keep storage
  /// order.
  fn list_recent(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Merge `patch` into the stored person and return the result, or `None`
  /// if `id` does not exist.
  fn update_person(
    &self,
    id: Uuid,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Hard-delete a person. Returns `false` if `id` does not exist.
  fn delete_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
