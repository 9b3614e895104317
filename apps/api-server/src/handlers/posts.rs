//! Post handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::Post;
use quill_shared::ErrorResponse;
use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::AppResult;
use crate::middleware::validation::ValidatedJson;
use crate::state::AppState;

fn list(posts: Vec<Post>) -> HttpResponse {
    HttpResponse::Ok().json(posts.into_iter().map(PostResponse::from).collect::<Vec<_>>())
}

/// Create a new post.
///
/// POST /posts
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    operation_id = "create_post",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created successfully", body = PostResponse),
        (status = 400, description = "Bad request or unknown author", body = ErrorResponse)
    )
)]
pub async fn create(
    state: web::Data<AppState>,
    body: ValidatedJson<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// Get all posts.
///
/// GET /posts
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    operation_id = "find_all_posts",
    responses((status = 200, description = "List of all posts", body = [PostResponse]))
)]
pub async fn find_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(list(state.posts.find_all().await?))
}

/// Get all published posts.
///
/// GET /posts/published
#[utoipa::path(
    get,
    path = "/posts/published",
    tag = "posts",
    operation_id = "find_published_posts",
    responses((status = 200, description = "List of published posts", body = [PostResponse]))
)]
pub async fn find_published(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(list(state.posts.find_published().await?))
}

/// Get posts by author ID.
///
/// GET /posts/author/{authorId}
#[utoipa::path(
    get,
    path = "/posts/author/{authorId}",
    tag = "posts",
    operation_id = "find_posts_by_author",
    params(("authorId" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "List of posts by author", body = [PostResponse]),
        (status = 400, description = "Non-numeric ID", body = ErrorResponse)
    )
)]
pub async fn find_by_author(
    state: web::Data<AppState>,
    author_id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    Ok(list(state.posts.find_by_author(author_id.into_inner()).await?))
}

/// Get a post by ID.
///
/// GET /posts/{id}
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    operation_id = "find_post",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post found", body = PostResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn find_one(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find_one(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// Update a post.
///
/// PATCH /posts/{id}
#[utoipa::path(
    patch,
    path = "/posts/{id}",
    tag = "posts",
    operation_id = "update_post",
    params(("id" = i32, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated successfully", body = PostResponse),
        (status = 400, description = "Bad request or unknown author", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    body: ValidatedJson<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(id.into_inner(), body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// Delete a post.
///
/// DELETE /posts/{id}
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    operation_id = "remove_post",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted successfully"),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn remove(state: web::Data<AppState>, id: web::Path<i32>) -> AppResult<HttpResponse> {
    state.posts.remove(id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
