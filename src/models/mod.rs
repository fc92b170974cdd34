//! Wire and domain models.

pub mod auth;
pub mod envelope;
pub mod records;
