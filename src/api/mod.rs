//! Thin endpoint wrappers: each function maps parameters to one pipeline
//! call and decodes the unwrapped payload. No logic lives here; callers get
//! either data or the pipeline's classified error.

pub mod activities;
pub mod auth;
pub mod orders;
pub mod teams;
pub mod users;
