//! HTTP handlers and route configuration.

pub mod docs;
mod health;
mod posts;
mod users;


use actix_web::web;

use crate::middleware::validation;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .route("/health", web::get().to(health::health_check))
        .route("/api", web::get().to(docs::openapi_json))
        .service(
            web::scope("/users")
                .route("", web::post().to(users::create))
                .route("", web::get().to(users::find_all))
                .route("/{id}", web::get().to(users::find_one))
                .route("/{id}", web::patch().to(users::update))
                .route("/{id}", web::delete().to(users::remove)),
        )
        .service(
            web::scope("/posts")
                .route("", web::post().to(posts::create))
                .route("", web::get().to(posts::find_all))
                // Literal segments before `/{id}`
                .route("/published", web::get().to(posts::find_published))
                .route("/author/{authorId}", web::get().to(posts::find_by_author))
                .route("/{id}", web::get().to(posts::find_one))
                .route("/{id}", web::patch().to(posts::update))
                .route("/{id}", web::delete().to(posts::remove)),
        );
}
