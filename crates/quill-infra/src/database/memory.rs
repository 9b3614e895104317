//! In-memory repositories - used by tests and when `DATABASE_URL=memory`.
//!
//! Both repositories share one [`InMemoryStore`] so the relational rules the
//! database enforces (unique email, author foreign key, cascade on user
//! delete) hold here as well. Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, NewUser, Post, PostChanges, User, UserChanges};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    user_seq: i32,
    post_seq: i32,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn require_author(&self, author_id: i32) -> Result<(), RepoError> {
        if self.users.contains_key(&author_id) {
            Ok(())
        } else {
            Err(RepoError::ForeignKey(format!(
                "author_id {} is not present in table \"users\"",
                author_id
            )))
        }
    }
}

/// Shared table storage behind a single async lock.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;

        // ON DELETE CASCADE
        tables.posts.retain(|_, post| post.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.store.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(RepoError::Constraint(format!(
                "duplicate key value violates unique constraint: email {}",
                user.email
            )));
        }

        tables.user_seq += 1;
        let now = Utc::now();
        let user = User {
            id: tables.user_seq,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            age: user.age,
            is_active: user.is_active,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, RepoError> {
        let mut tables = self.store.tables.write().await;
        if let Some(email) = &changes.email {
            if tables.email_taken(email, Some(id)) {
                return Err(RepoError::Constraint(format!(
                    "duplicate key value violates unique constraint: email {}",
                    email
                )));
            }
        }

        let user = tables.users.get_mut(&id).ok_or(RepoError::NotFound)?;
        changes.apply_to(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.posts.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.require_author(post.author_id)?;

        tables.post_seq += 1;
        let now = Utc::now();
        let post = Post {
            id: tables.post_seq,
            title: post.title,
            content: post.content,
            is_published: post.is_published,
            author_id: post.author_id,
            created_at: now,
            updated_at: now,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        if let Some(author_id) = changes.author_id {
            tables.require_author(author_id)?;
        }

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        changes.apply_to(post);
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.is_published)
            .cloned()
            .collect())
    }

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos() -> (InMemoryUserRepository, InMemoryPostRepository) {
        let store = InMemoryStore::new();
        (
            InMemoryUserRepository::new(store.clone()),
            InMemoryPostRepository::new(store),
        )
    }

    fn john() -> NewUser {
        NewUser::new("John".into(), "Doe".into(), "john@x.com".into())
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let (users, _) = repos();
        let first = users.insert(john()).await.unwrap();
        let second = users
            .insert(NewUser::new("Jane".into(), "Doe".into(), "jane@x.com".into()))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);

        let all = users.find_all().await.unwrap();
        assert_eq!(all.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_constraint_violation() {
        let (users, _) = repos();
        users.insert(john()).await.unwrap();

        let err = users.insert(john()).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
        assert_eq!(users.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_rejected() {
        let (users, _) = repos();
        users.insert(john()).await.unwrap();
        let jane = users
            .insert(NewUser::new("Jane".into(), "Doe".into(), "jane@x.com".into()))
            .await
            .unwrap();

        let changes = UserChanges {
            email: Some("john@x.com".into()),
            ..Default::default()
        };
        let err = users.update(jane.id, changes).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_post_requires_existing_author() {
        let (_, posts) = repos();
        let err = posts
            .insert(NewPost::new(42, "Title".into(), "Body".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::ForeignKey(_)));
        assert!(posts.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_delete_cascades_to_posts() {
        let (users, posts) = repos();
        let john = users.insert(john()).await.unwrap();
        let jane = users
            .insert(NewUser::new("Jane".into(), "Doe".into(), "jane@x.com".into()))
            .await
            .unwrap();
        let johns = posts
            .insert(NewPost::new(john.id, "Mine".into(), "Body".into()))
            .await
            .unwrap();
        let janes = posts
            .insert(NewPost::new(jane.id, "Hers".into(), "Body".into()))
            .await
            .unwrap();

        users.delete(john.id).await.unwrap();

        assert!(posts.find_by_id(johns.id).await.unwrap().is_none());
        assert!(posts.find_by_id(janes.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (users, posts) = repos();
        assert!(matches!(users.delete(9).await, Err(RepoError::NotFound)));
        assert!(matches!(posts.delete(9).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_published_and_author_filters() {
        let (users, posts) = repos();
        let author = users.insert(john()).await.unwrap();
        let mut draft = NewPost::new(author.id, "Draft".into(), "Body".into());
        posts.insert(draft.clone()).await.unwrap();
        draft.title = "Live".into();
        draft.is_published = true;
        let live = posts.insert(draft).await.unwrap();

        let published = posts.find_published().await.unwrap();
        assert_eq!(published, vec![live]);

        assert_eq!(posts.find_by_author(author.id).await.unwrap().len(), 2);
        assert!(posts.find_by_author(author.id + 1).await.unwrap().is_empty());
    }
}
