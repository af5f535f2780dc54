//! API error types with IntoResponse
//!
//! This is the one place where failure kinds become HTTP status codes.
//! Bodies are `{"error": <kind>, "detail": <message>}`; the bundled pages
//! read `detail`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Request body could not be parsed (status from the rejection)
    Payload(JsonRejection),

    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// Uniqueness violation (400)
    Conflict { message: String },

    /// Storage fault (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn user_not_found() -> Self {
        Self::NotFound { resource: "User" }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Payload(rejection) => rejection.status(),
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (kind, detail) = match &self {
            Self::Validation(e) => ("validation_error", e.to_string()),
            Self::Payload(rejection) => ("invalid_payload", rejection.body_text()),
            Self::NotFound { resource } => ("not_found", format!("{} not found", resource)),
            Self::Conflict { message } => ("conflict", message.clone()),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                ("internal_error", e.to_string())
            }
        };

        (status, Json(json!({ "error": kind, "detail": detail }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Payload(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Validation(v) => Self::Validation(v),
            DbError::Conflict { .. } => Self::Conflict {
                message: e.to_string(),
            },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "name" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_is_404_with_detail() {
        let response = ApiError::user_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["detail"], "User not found");
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn conflict_is_400_with_detail() {
        let err = ApiError::from(DbError::Conflict {
            field: "email",
            value: "a@x.com".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["detail"], "Email already exists");
    }

    #[tokio::test]
    async fn storage_error_is_500_with_cause() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Database error:"));
        assert!(detail.contains("closed"));
    }

    #[tokio::test]
    async fn db_validation_maps_to_validation() {
        let err = ApiError::from(DbError::Validation(ValidationError::NotPositive {
            field: "user id",
            value: 0,
        }));
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
