//! Command implementations for the usersvc CLI

pub mod dump;
pub mod serve;

pub use dump::run_dump;
pub use serve::run_serve;
