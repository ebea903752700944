//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure becomes HTTP 400 with a `success: false` envelope whose
//! `error.kind` says which class of failure it was.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::{Method, StatusCode},
  response::{IntoResponse, Response},
};
use shelter_core::envelope::{Envelope, ErrorKind};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("invalid person: {0}")]
  Validation(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("method {0} not supported on this route")]
  MethodNotAllowed(Method),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap any backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::NotFound(_) => ErrorKind::NotFound,
      Self::Validation(_) => ErrorKind::Validation,
      Self::BadRequest(_) => ErrorKind::BadRequest,
      Self::MethodNotAllowed(_) => ErrorKind::MethodNotAllowed,
      Self::Store(_) => ErrorKind::StoreFault,
    }
  }
}

impl From<shelter_core::Error> for ApiError {
  fn from(e: shelter_core::Error) -> Self { Self::Validation(e.to_string()) }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    match rejection {
      // Well-formed JSON that does not fit the person shape: a missing
      // required field, a wrong type, an unknown blood type.
      JsonRejection::JsonDataError(e) => Self::Validation(e.body_text()),
      other => Self::BadRequest(other.body_text()),
    }
  }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::Store(e) => tracing::error!(error = %e, "store fault"),
      other => tracing::warn!(kind = ?other.kind(), "{other}"),
    }
    let body = Envelope::<()>::failure(self.kind(), self.to_string());
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
  }
}
