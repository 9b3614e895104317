use std::sync::Arc;

use crate::domain::{NewUser, User, UserChanges};
use crate::error::{DomainError, RepoError};
use crate::ports::UserRepository;

use super::or_not_found;

const ENTITY: &str = "User";

/// CRUD operations on users.
pub struct UsersService {
    repo: Arc<dyn UserRepository>,
}

impl UsersService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Persist a new user. A taken email fails with `DomainError::Duplicate`.
    pub async fn create(&self, input: NewUser) -> Result<User, DomainError> {
        let email = input.email.clone();
        self.ensure_email_available(&email).await?;

        // The unique index still guards concurrent registrations.
        let user = self
            .repo
            .insert(input)
            .await
            .map_err(|e| duplicate_email(e, &email))?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn find_one(&self, id: i32) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    /// Merge the supplied fields into an existing user.
    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<User, DomainError> {
        let current = self.find_one(id).await?;
        if changes.is_empty() {
            return Ok(current);
        }

        let email = changes.email.clone();
        if let Some(email) = email.as_deref().filter(|e| *e != current.email) {
            self.ensure_email_available(email).await?;
        }

        let user = self
            .repo
            .update(id, changes)
            .await
            .map_err(|e| match (e, email.as_deref()) {
                (RepoError::Constraint(_), Some(email)) => email_taken(email),
                (e, _) => or_not_found(e, ENTITY, id),
            })?;

        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    /// Delete a user. Their posts go with them.
    pub async fn remove(&self, id: i32) -> Result<(), DomainError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| or_not_found(e, ENTITY, id))?;

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn ensure_email_available(&self, email: &str) -> Result<(), DomainError> {
        match self.repo.find_by_email(email).await? {
            Some(_) => Err(email_taken(email)),
            None => Ok(()),
        }
    }
}

fn email_taken(email: &str) -> DomainError {
    DomainError::Duplicate(format!("Email {} is already registered", email))
}

fn duplicate_email(err: RepoError, email: &str) -> DomainError {
    match err {
        RepoError::Constraint(_) => email_taken(email),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::BaseRepository;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Single-row repository that records whether `update` was reached.
    #[derive(Default)]
    struct OneUser {
        user: Mutex<Option<User>>,
        updates: Mutex<usize>,
    }

    impl OneUser {
        fn with(user: User) -> Self {
            Self {
                user: Mutex::new(Some(user)),
                updates: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl BaseRepository<User, i32> for OneUser {
        async fn find_all(&self) -> Result<Vec<User>, RepoError> {
            Ok(self.user.lock().unwrap().clone().into_iter().collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
            Ok(self.user.lock().unwrap().clone().filter(|u| u.id == id))
        }

        async fn delete(&self, _id: i32) -> Result<(), RepoError> {
            Err(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl UserRepository for OneUser {
        async fn insert(&self, _user: NewUser) -> Result<User, RepoError> {
            Err(RepoError::Constraint("users_email_key".into()))
        }

        async fn update(&self, id: i32, changes: UserChanges) -> Result<User, RepoError> {
            *self.updates.lock().unwrap() += 1;
            let mut guard = self.user.lock().unwrap();
            let user = guard.as_mut().filter(|u| u.id == id).ok_or(RepoError::NotFound)?;
            changes.apply_to(user);
            Ok(user.clone())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            Ok(self.user.lock().unwrap().clone().filter(|u| u.email == email))
        }
    }

    fn john() -> User {
        let now = Utc::now();
        User {
            id: 1,
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@x.com".into(),
            age: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(repo: Arc<OneUser>) -> UsersService {
        UsersService::new(repo)
    }

    #[tokio::test]
    async fn test_create_rejects_taken_email() {
        let svc = service(Arc::new(OneUser::with(john())));
        let err = svc
            .create(NewUser::new("J".into(), "D".into(), "john@x.com".into()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate entity: Email john@x.com is already registered");
    }

    #[tokio::test]
    async fn test_unique_index_race_maps_to_duplicate() {
        let svc = service(Arc::new(OneUser::default()));
        let err = svc
            .create(NewUser::new("J".into(), "D".into(), "new@x.com".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_empty_update_returns_current() {
        let original = john();
        let repo = Arc::new(OneUser::with(original.clone()));
        let svc = service(repo.clone());

        let user = svc.update(1, UserChanges::default()).await.unwrap();

        assert_eq!(user, original);
        assert_eq!(*repo.updates.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeping_own_email() {
        let svc = service(Arc::new(OneUser::with(john())));
        let changes = UserChanges {
            email: Some("john@x.com".into()),
            age: Some(Some(30)),
            ..Default::default()
        };

        let user = svc.update(1, changes).await.unwrap();
        assert_eq!(user.age, Some(30));
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let svc = service(Arc::new(OneUser::default()));

        let err = svc.find_one(9).await.unwrap_err();
        assert_eq!(err.to_string(), "User with id 9 not found");

        let err = svc.remove(9).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 9, .. }));
    }
}
