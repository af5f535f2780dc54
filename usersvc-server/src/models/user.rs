//! User record and validated inputs
//!
//! `NewUser` and `UserChanges` can only be built through their
//! constructors, so anything reaching the repository is already checked.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Patch, ValidationError};

/// Stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
}

/// Validated user id (strictly positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Create a user id, rejecting zero and negative values.
    ///
    /// # Example
    /// ```
    /// use usersvc_server::models::UserId;
    ///
    /// assert!(UserId::new(1).is_ok());
    /// assert!(UserId::new(0).is_err());
    /// assert!(UserId::new(-7).is_err());
    /// ```
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::NotPositive {
                field: "user id",
                value: id,
            });
        }
        Ok(Self(id))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Input for creating a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    email: String,
    name: String,
    age: Option<i32>,
}

impl NewUser {
    /// Build a new user. Email and name are trimmed and must not be empty.
    pub fn new(
        email: impl AsRef<str>,
        name: impl AsRef<str>,
        age: Option<i32>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            email: required("email", email.as_ref())?,
            name: required("name", name.as_ref())?,
            age,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }
}

/// Partial update for an existing user.
///
/// `email` and `name` are non-nullable columns: `None` keeps the stored value.
/// `age` is nullable, so it carries the full tri-state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    email: Option<String>,
    name: Option<String>,
    age: Patch<i32>,
}

impl UserChanges {
    pub fn new(
        email: Option<String>,
        name: Option<String>,
        age: Patch<i32>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            email: email.map(|e| required("email", &e)).transpose()?,
            name: name.map(|n| required("name", &n)).transpose()?,
            age,
        })
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn age(&self) -> Patch<i32> {
        self.age
    }

    /// True when applying these changes would leave a record untouched.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.age.is_missing()
    }

    /// Merge onto the stored record. Fields not supplied keep their value.
    pub fn apply_to(&self, current: &User) -> User {
        User {
            id: current.id,
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            age: self.age.apply(current.age),
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}
