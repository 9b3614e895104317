//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostRepository, UserRepository};
use quill_core::{PostsService, UsersService};
use quill_infra::database::{
    DatabaseConnections, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
    PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UsersService>,
    pub posts: Arc<PostsService>,
    /// `None` when running on the in-memory store.
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Wire the services onto the PostgreSQL repositories.
    pub fn postgres(connections: DatabaseConnections) -> Self {
        let users = Arc::new(PostgresUserRepository::new(connections.main.clone()));
        let posts = Arc::new(PostgresPostRepository::new(connections.main.clone()));

        Self::from_repositories(users, posts, Some(Arc::new(connections)))
    }

    /// Wire the services onto a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        let users = Arc::new(InMemoryUserRepository::new(store.clone()));
        let posts = Arc::new(InMemoryPostRepository::new(store));

        Self::from_repositories(users, posts, None)
    }

    fn from_repositories(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        db: Option<Arc<DatabaseConnections>>,
    ) -> Self {
        tracing::info!(
            storage = if db.is_some() { "postgres" } else { "memory" },
            "Application state initialized"
        );

        Self {
            users: Arc::new(UsersService::new(users)),
            posts: Arc::new(PostsService::new(posts)),
            db,
        }
    }
}
