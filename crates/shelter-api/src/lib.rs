//! JSON REST API for the shelter roster.
//!
//! Exposes an axum [`Router`] backed by any [`shelter_core::store::PersonStore`].
//! TLS, logging layers and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", shelter_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod people;

use std::sync::Arc;

use axum::{Router, routing::get};
use shelter_core::store::PersonStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route(
      "/people",
      get(people::list::<S>)
        .post(people::create::<S>)
        .fallback(people::unsupported),
    )
    .route(
      "/people/recent",
      get(people::recent::<S>).fallback(people::unsupported),
    )
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .put(people::update::<S>)
        .delete(people::delete::<S>)
        .fallback(people::unsupported),
    )
    .fallback(people::unknown_route)
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
