//! Route handlers
//!
//! - users: CRUD over the users table
//! - pages: the two bundled HTML pages
//! - health: liveness plus a database ping

pub mod health;
pub mod pages;
pub mod users;
