//! User handlers.

use actix_web::{HttpResponse, web};

use quill_shared::ErrorResponse;
use quill_shared::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};

use crate::middleware::error::AppResult;
use crate::middleware::validation::ValidatedJson;
use crate::state::AppState;

/// Create a new user.
///
/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    operation_id = "create_user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create(
    state: web::Data<AppState>,
    body: ValidatedJson<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let user = state.users.create(body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Get all users.
///
/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    operation_id = "find_all_users",
    responses((status = 200, description = "List of all users", body = [UserResponse]))
)]
pub async fn find_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;
    Ok(HttpResponse::Ok().json(
        users.into_iter().map(UserResponse::from).collect::<Vec<_>>(),
    ))
}

/// Get a user by ID.
///
/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    operation_id = "find_user",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Non-numeric ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn find_one(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = state.users.find_one(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Update a user.
///
/// PATCH /users/{id}
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    operation_id = "update_user",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    body: ValidatedJson<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .update(id.into_inner(), body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Delete a user and their posts.
///
/// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    operation_id = "remove_user",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn remove(state: web::Data<AppState>, id: web::Path<i32>) -> AppResult<HttpResponse> {
    state.users.remove(id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
