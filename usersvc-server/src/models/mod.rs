//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod patch;
pub mod user;
pub mod validation;

pub use patch::Patch;
pub use user::{NewUser, User, UserChanges, UserId};
pub use validation::ValidationError;
