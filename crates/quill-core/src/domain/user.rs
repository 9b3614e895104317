use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - represents a user in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user that has not been persisted yet. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: Option<i32>,
    pub is_active: bool,
}

impl NewUser {
    /// Create an active user without an age.
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        Self {
            first_name,
            last_name,
            email,
            age: None,
            is_active: true,
        }
    }
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the age.
    pub age: Option<Option<i32>>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.is_active.is_none()
    }

    /// Merge the supplied fields into `user`. Timestamps are left to the store.
    pub fn apply_to(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
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

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::new("John".into(), "Doe".into(), "john@x.com".into());
        assert!(user.is_active);
        assert_eq!(user.age, None);
    }

    #[test]
    fn test_apply_only_supplied_fields() {
        let mut user = sample();
        let changes = UserChanges {
            last_name: Some("Smith".into()),
            age: Some(Some(40)),
            ..Default::default()
        };
        assert!(!changes.is_empty());

        changes.apply_to(&mut user);

        assert_eq!(user.first_name, "John");
        assert_eq!(user.last_name, "Smith");
        assert_eq!(user.age, Some(40));
        assert!(user.is_active);
    }

    #[test]
    fn test_clear_age() {
        let mut user = User {
            age: Some(30),
            ..sample()
        };

        UserChanges {
            age: Some(None),
            ..Default::default()
        }
        .apply_to(&mut user);

        assert_eq!(user.age, None);
    }

    #[test]
    fn test_empty_changes() {
        assert!(UserChanges::default().is_empty());
    }
}
