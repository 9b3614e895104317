use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, PostChanges, User, UserChanges};
use crate::error::RepoError;

/// Generic repository trait defining the reads and deletes every table shares.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Every row, ordered by primary key (insertion order).
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if no row matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Insert a new user. A taken email fails with `RepoError::Constraint`.
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;

    /// Apply a partial update. Fails with `RepoError::NotFound` if the row is gone.
    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
///
/// Inserts and updates referencing a missing author fail with `RepoError::ForeignKey`.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError>;

    async fn find_published(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError>;
}
