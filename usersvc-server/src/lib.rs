//! usersvc-server: user records over HTTP
//!
//! Stores users (email, name, optional age) in a single SQLite table and
//! exposes create/read/update/delete/list over JSON, plus two HTML pages
//! for manual use.

pub mod db;
pub mod http;
pub mod models;

pub use db::repos::{DbError, UserRepo};
pub use http::{build_router, run_server, ServerConfig};
pub use models::{NewUser, Patch, User, UserChanges, UserId, ValidationError};
