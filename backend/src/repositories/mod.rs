//! Database repositories
//!
//! Data access layer over the persistence collaborator.

pub mod user;

#[cfg(test)]
pub mod memory;

pub use user::{normalize_email, PgUserRepository, StoreError, UserRecord, UserStore};
