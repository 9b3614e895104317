//! Services - thin CRUD orchestration over the repository ports.

mod posts;
mod users;

pub use posts::PostsService;
pub use users::UsersService;

use crate::error::{DomainError, RepoError};

/// Resolve a repository `NotFound` into the entity-aware domain error.
fn or_not_found(err: RepoError, entity_type: &'static str, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}
