use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - an article written by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub author_id: i32,
}

impl NewPost {
    /// Create an unpublished post.
    pub fn new(author_id: i32, title: String, content: String) -> Self {
        Self {
            title,
            content,
            is_published: false,
            author_id,
        }
    }
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_published: Option<bool>,
    pub author_id: Option<i32>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.is_published.is_none()
            && self.author_id.is_none()
    }

    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(is_published) = self.is_published {
            post.is_published = is_published;
        }
        if let Some(author_id) = self.author_id {
            post.author_id = author_id;
        }
    }
}
