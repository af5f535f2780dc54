//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Not-found is a value (`Option` / `bool`), never an error
//! - Unique constraint violations are reported as conflicts
//! - Writes run in a transaction that is rolled back on any failure

pub mod users;

pub use users::{DbError, UserRepo};
