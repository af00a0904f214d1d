//! User handlers
//!
//! Endpoints for user registration, listing and profile management.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{CreateUser, UpdateUser, User, UserId};
use crate::domain::ports::UserRepository;
use crate::domain::query::{ListUsersQuery, Page};
use crate::error::AppError;
use crate::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Request body for user registration
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email is not valid"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
}

/// Request body for a partial user update
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email is not valid"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(request: CreateUserRequest) -> Self {
        CreateUser {
            name: request.name,
            email: request.email,
            password: request.password,
            phone: request.phone,
            address: request.address,
            image: request.image,
            role: request.role,
        }
    }
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(request: UpdateUserRequest) -> Self {
        UpdateUser {
            name: request.name,
            email: request.email,
            password: request.password,
            phone: request.phone,
            address: request.address,
            image: request.image,
            role: request.role,
            is_active: request.is_active,
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /users
///
/// Register a new user.
pub async fn create_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let Json(request) = body?;
    request.validate()?;

    let user = state.user_service.create(request.into()).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/paginated
///
/// List users one page at a time with search, role and status filters.
pub async fn list_users_paginated<R: UserRepository>(
    State(state): State<AppState<R>>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Json<Page<User>>, AppError> {
    let Query(query) = query?;
    let params = query.validate()?;
    let page = state.user_service.list_page(&params).await?;

    Ok(Json(page))
}

/// GET /users
///
/// List every user without pagination.
pub async fn list_users<R: UserRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.user_service.find_all().await?))
}

/// GET /users/:id
pub async fn get_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let Path(id) = path?;
    let user = state
        .user_service
        .find_one(&UserId::from(id))
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(user))
}

/// PATCH /users/:id
pub async fn update_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let Path(id) = path?;
    let Json(request) = body?;
    request.validate()?;

    let user = state
        .user_service
        .update(&UserId::from(id), request.into())
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(user))
}

/// DELETE /users/:id
pub async fn delete_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let Path(id) = path?;
    let user = state
        .user_service
        .remove(&UserId::from(id))
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(user))
}
