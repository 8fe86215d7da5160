//! SQLite backend for the HANS record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime. Uniqueness and foreign-key
//! invariants live in the schema, not in application checks, so concurrent
//! administrative writes cannot race past them.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
