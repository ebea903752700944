//! Core types and trait definitions for the shelter roster.
//!
//! This crate has no HTTP or database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod envelope;
pub mod error;
pub mod person;
pub mod stats;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
