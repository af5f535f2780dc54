//! User endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::UserRepo;
use crate::http::error::ApiError;
use crate::http::extractors::ValidUserId;
use crate::http::server::AppState;
use crate::models::{NewUser, Patch, User, UserChanges, ValidationError};

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<i32>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ValidationError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        NewUser::new(req.email, req.name, req.age)
    }
}

/// Update user request. Absent keys keep the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Patch<i32>,
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = ValidationError;

    fn try_from(req: UpdateUserRequest) -> Result<Self, Self::Error> {
        UserChanges::new(req.email, req.name, req.age)
    }
}

/// Delete confirmation
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// GET /users/ - list every user
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepo::new(&state.pool).list_all().await?;
    Ok(Json(users))
}

/// POST /users/ - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(req) = payload?;
    let new_user = NewUser::try_from(req)?;
    let user = UserRepo::new(&state.pool).create(&new_user).await?;
    Ok(Json(user))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
) -> Result<Json<User>, ApiError> {
    let user = UserRepo::new(&state.pool)
        .get(id)
        .await?
        .ok_or_else(ApiError::user_not_found)?;
    Ok(Json(user))
}

/// PUT /users/{id} - update supplied fields
async fn update_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(req) = payload?;
    let changes = UserChanges::try_from(req)?;
    let user = UserRepo::new(&state.pool)
        .update(id, &changes)
        .await?
        .ok_or_else(ApiError::user_not_found)?;
    Ok(Json(user))
}

/// DELETE /users/{id} - remove a user
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !UserRepo::new(&state.pool).delete(id).await? {
        return Err(ApiError::user_not_found());
    }
    Ok(Json(DeleteResponse {
        message: "User deleted successfully",
    }))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
