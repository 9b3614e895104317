use std::sync::Arc;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

use super::or_not_found;

const ENTITY: &str = "Post";

/// CRUD operations on posts plus the published/author filters.
pub struct PostsService {
    repo: Arc<dyn PostRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Persist a new post. An unknown author fails with `DomainError::InvalidReference`.
    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        let author_id = input.author_id;
        let post = self
            .repo
            .insert(input)
            .await
            .map_err(|e| unknown_author(e, author_id))?;

        tracing::info!(post_id = post.id, author_id, "Post created");
        Ok(post)
    }

    pub async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn find_published(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_published().await?)
    }

    /// Posts written by `author_id`; empty when the author has none or does not exist.
    pub async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_by_author(author_id).await?)
    }

    pub async fn find_one(&self, id: i32) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, DomainError> {
        let current = self.find_one(id).await?;
        if changes.is_empty() {
            return Ok(current);
        }

        let author_id = changes.author_id;
        let post = self
            .repo
            .update(id, changes)
            .await
            .map_err(|e| match (e, author_id) {
                (e @ RepoError::ForeignKey(_), Some(author_id)) => unknown_author(e, author_id),
                (e, _) => or_not_found(e, ENTITY, id),
            })?;

        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    pub async fn remove(&self, id: i32) -> Result<(), DomainError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| or_not_found(e, ENTITY, id))?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn unknown_author(err: RepoError, author_id: i32) -> DomainError {
    match err {
        RepoError::ForeignKey(_) => DomainError::InvalidReference(format!(
            "authorId {} does not reference an existing user",
            author_id
        )),
        other => other.into(),
    }
}
