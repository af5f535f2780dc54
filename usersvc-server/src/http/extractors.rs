//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract a user id from the path.
///
/// Only checks that the segment is an integer; positivity is enforced by
/// the repository so every caller gets the same rule.
pub struct ValidUserId(pub i64);

impl<S> FromRequestParts<S> for ValidUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "user id" }))?;

        let id = raw.trim().parse::<i64>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "user id",
                reason: "must be an integer",
            })
        })?;

        Ok(Self(id))
    }
}
