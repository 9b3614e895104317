//! Generated OpenAPI document.

use actix_web::HttpResponse;
use utoipa::OpenApi;

use quill_shared::ErrorResponse;
use quill_shared::dto::{
    CreatePostRequest, CreateUserRequest, PostResponse, UpdatePostRequest, UpdateUserRequest,
    UserResponse,
};

use super::{health, posts, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quill CRUD API",
        description = "A complete CRUD API for users and their posts, backed by PostgreSQL",
        version = "1.0"
    ),
    paths(
        users::create,
        users::find_all,
        users::find_one,
        users::update,
        users::remove,
        posts::create,
        posts::find_all,
        posts::find_published,
        posts::find_by_author,
        posts::find_one,
        posts::update,
        posts::remove,
        health::health_check,
    ),
    components(schemas(
        CreateUserRequest,
        UpdateUserRequest,
        UserResponse,
        CreatePostRequest,
        UpdatePostRequest,
        PostResponse,
        ErrorResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "users", description = "User management"),
        (name = "posts", description = "Posts and their authors"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// GET /api
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
