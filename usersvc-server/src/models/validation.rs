//! Validation error types

use std::fmt;

/// Validation error for user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// String or path segment doesn't have the required shape
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Identifier must be strictly positive
    NotPositive { field: &'static str, value: i64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
            Self::NotPositive { field, value } => {
                write!(f, "invalid {}: must be a positive integer, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::NotPositive {
            field: "user id",
            value: 0,
        };
        assert_eq!(
            err.to_string(),
            "invalid user id: must be a positive integer, got 0"
        );

        let err = ValidationError::Empty { field: "email" };
        assert_eq!(err.to_string(), "email cannot be empty");
    }
}
