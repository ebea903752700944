//! Handlers for `/people` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/people`        | Every person, storage order |
//! | `POST`   | `/people`        | Body: [`NewPerson`]; returns 201 + stored person |
//! | `GET`    | `/people/recent` | Newest five by `createdAt` |
//! | `GET`    | `/people/:id`    | `{"success":true}` without `data` if absent |
//! | `PUT`    | `/people/:id`    | Body: [`PersonPatch`]; returns merged person |
//! | `DELETE` | `/people/:id`    | `{"success":true}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::{Method, StatusCode, Uri},
  response::IntoResponse,
};
use chrono::Utc;
use shelter_core::{
  envelope::Envelope,
  person::{NewPerson, Person, PersonPatch},
  store::{PersonStore, RECENT_LIMIT},
};
use uuid::Uuid;

use crate::error::ApiError;

type Reply<T> = Result<Json<Envelope<T>>, ApiError>;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /people`
pub async fn list<S>(State(store): State<Arc<S>>) -> Reply<Vec<Person>>
where
  S: PersonStore,
{
  let people = store.list_people().await.map_err(ApiError::store)?;
  Ok(Json(Envelope::ok(people)))
}

/// `GET /people/recent`
pub async fn recent<S>(State(store): State<Arc<S>>) -> Reply<Vec<Person>>
where
  S: PersonStore,
{
  let people = store
    .list_recent(RECENT_LIMIT)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(Envelope::ok(people)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /people`: returns 201 + the stored [`Person`].
///
/// `createdAt` is stamped here; anything the client sent for it is ignored.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewPerson>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
{
  let Json(input) = body?;
  input.validate()?;

  let person = store
    .insert_person(input, Utc::now())
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = %person.id, "person created");
  Ok((StatusCode::CREATED, Json(Envelope::ok(person))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /people/:id`: a missing id is a success without `data`.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<Uuid>, PathRejection>,
) -> Reply<Person>
where
  S: PersonStore,
{
  let Path(id) = id?;
  let person = store.get_person(id).await.map_err(ApiError::store)?;
  Ok(Json(person.map_or_else(Envelope::empty, Envelope::ok)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /people/:id`: merges the body into the stored person.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<Uuid>, PathRejection>,
  body: Result<Json<PersonPatch>, JsonRejection>,
) -> Reply<Person>
where
  S: PersonStore,
{
  let Path(id) = id?;
  let Json(patch) = body?;
  patch.validate()?;

  let person = store
    .update_person(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  tracing::info!(%id, "person updated");
  Ok(Json(Envelope::ok(person)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /people/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<Uuid>, PathRejection>,
) -> Reply<Person>
where
  S: PersonStore,
{
  let Path(id) = id?;
  if !store.delete_person(id).await.map_err(ApiError::store)? {
    return Err(ApiError::NotFound(format!("person {id} not found")));
  }
  tracing::info!(%id, "person deleted");
  Ok(Json(Envelope::empty()))
}

// ─── Fallbacks ────────────────────────────────────────────────────────────────

/// Any verb a route does not list.
pub async fn unsupported(method: Method) -> ApiError {
  ApiError::MethodNotAllowed(method)
}

/// Any path outside the table above.
pub async fn unknown_route(uri: Uri) -> ApiError {
  ApiError::BadRequest(format!("no route for {}", uri.path()))
}
