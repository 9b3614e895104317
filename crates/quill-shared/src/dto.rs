//! Data Transfer Objects - request/response types for the API.
//!
//! Request bodies reject undeclared fields at deserialization and declare
//! their field rules with `validator`; every message names the JSON field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use quill_core::domain::{NewPost, NewUser, Post, PostChanges, User, UserChanges};

/// The JSON properties a request body may carry.
pub trait Whitelist {
    const FIELDS: &'static [&'static str];
}

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    /// The first name of the user.
    #[validate(
        required(message = "firstName should not be empty"),
        length(min = 1, max = 100, message = "firstName must be between 1 and 100 characters")
    )]
    #[schema(value_type = String, required = true, example = "John")]
    pub first_name: Option<String>,

    /// The last name of the user.
    #[validate(
        required(message = "lastName should not be empty"),
        length(min = 1, max = 100, message = "lastName must be between 1 and 100 characters")
    )]
    #[schema(value_type = String, required = true, example = "Doe")]
    pub last_name: Option<String>,

    /// The email address of the user.
    #[validate(
        required(message = "email should not be empty"),
        email(message = "email must be an email"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    #[schema(value_type = String, required = true, example = "john.doe@example.com")]
    pub email: Option<String>,

    /// The age of the user.
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    #[schema(example = 25)]
    pub age: Option<i32>,

    /// Whether the user is active. Defaults to true.
    #[schema(example = true)]
    pub is_active: Option<bool>,
}

impl Whitelist for CreateUserRequest {
    const FIELDS: &'static [&'static str] = &["firstName", "lastName", "email", "age", "isActive"];
}

/// Partial user update; omitted fields stay unchanged, `"age": null` clears the age.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "firstName must be between 1 and 100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "lastName must be between 1 and 100 characters"))]
    pub last_name: Option<String>,

    #[validate(
        email(message = "email must be an email"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    #[schema(value_type = Option<i32>)]
    pub age: Option<Option<i32>>,

    pub is_active: Option<bool>,
}

impl Whitelist for UpdateUserRequest {
    const FIELDS: &'static [&'static str] = CreateUserRequest::FIELDS;
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePostRequest {
    /// The title of the post.
    #[validate(
        required(message = "title should not be empty"),
        length(min = 1, max = 200, message = "title must be between 1 and 200 characters")
    )]
    #[schema(value_type = String, required = true, example = "My First Post")]
    pub title: Option<String>,

    /// The content of the post.
    #[validate(
        required(message = "content should not be empty"),
        length(min = 1, message = "content should not be empty")
    )]
    #[schema(value_type = String, required = true, example = "This is the content of my first post.")]
    pub content: Option<String>,

    /// Whether the post is published. Defaults to false.
    #[schema(example = false)]
    pub is_published: Option<bool>,

    /// The ID of the author.
    #[validate(
        required(message = "authorId should not be empty"),
        range(min = 1, message = "authorId must not be less than 1")
    )]
    #[schema(value_type = i32, required = true, example = 1)]
    pub author_id: Option<i32>,
}

impl Whitelist for CreatePostRequest {
    const FIELDS: &'static [&'static str] = &["title", "content", "isPublished", "authorId"];
}

/// Partial post update; omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "content should not be empty"))]
    pub content: Option<String>,

    pub is_published: Option<bool>,

    #[validate(range(min = 1, message = "authorId must not be less than 1"))]
    pub author_id: Option<i32>,
}

impl Whitelist for UpdatePostRequest {
    const FIELDS: &'static [&'static str] = CreatePostRequest::FIELDS;
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// The unique identifier of the user.
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    /// The unique identifier of the post.
    pub id: i32,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    /// The ID of the author.
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Required fields are guaranteed by `validate()`, which runs first.
impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            age: req.age,
            is_active: req.is_active.unwrap_or(true),
        }
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            age: req.age,
            is_active: req.is_active,
        }
    }
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title.unwrap_or_default(),
            content: req.content.unwrap_or_default(),
            is_published: req.is_published.unwrap_or(false),
            author_id: req.author_id.unwrap_or_default(),
        }
    }
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            is_published: req.is_published,
            author_id: req.author_id,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            age: user.age,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            is_published: post.is_published,
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Strip properties not listed in `fields`, returning one message per property.
pub fn strip_undeclared(body: &mut Map<String, Value>, fields: &[&str]) -> Vec<String> {
    let undeclared: Vec<String> = body
        .keys()
        .filter(|key| !fields.contains(&key.as_str()))
        .cloned()
        .collect();

    undeclared
        .into_iter()
        .map(|key| {
            body.remove(&key);
            format!("property {} should not exist", key)
        })
        .collect()
}

/// Flatten validation failures into messages, ordered by field name.
pub fn violations(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid ({})", field, e.code),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_user_defaults() {
        let req: CreateUserRequest = serde_json::from_value(json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "john@x.com"
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let user = NewUser::from(req);
        assert!(user.is_active);
        assert_eq!(user.age, None);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = serde_json::from_value::<CreateUserRequest>(json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "john@x.com",
            "role": "admin"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unknown field `role`"));

        assert!(serde_json::from_value::<UpdatePostRequest>(json!({ "views": 3 })).is_err());
    }

    #[test]
    fn test_all_violations_are_reported() {
        let req: CreateUserRequest = serde_json::from_value(json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "not-an-email",
            "age": 200
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert_eq!(
            violations(&errors),
            vec![
                "age must be between 0 and 150".to_string(),
                "email must be an email".to_string(),
            ]
        );
    }

    #[test]
    fn test_create_post_rules() {
        let req: CreatePostRequest = serde_json::from_value(json!({
            "title": "",
            "content": "",
            "authorId": 0
        }))
        .unwrap();

        let messages = violations(&req.validate().unwrap_err());
        assert_eq!(messages.len(), 3);
        assert!(messages.contains(&"authorId must not be less than 1".to_string()));
    }

    #[test]
    fn test_missing_required_fields_are_violations() {
        let req: CreatePostRequest = serde_json::from_value(json!({ "isPublished": true })).unwrap();

        assert_eq!(
            violations(&req.validate().unwrap_err()),
            vec![
                "authorId should not be empty".to_string(),
                "content should not be empty".to_string(),
                "title should not be empty".to_string(),
            ]
        );
    }

    #[test]
    fn test_strip_undeclared_properties() {
        let mut body = json!({ "firstName": "John", "role": "admin", "admin": true })
            .as_object()
            .cloned()
            .unwrap();

        let messages = strip_undeclared(&mut body, CreateUserRequest::FIELDS);

        assert_eq!(
            messages,
            vec![
                "property admin should not exist".to_string(),
                "property role should not exist".to_string(),
            ]
        );
        assert_eq!(body.keys().collect::<Vec<_>>(), vec!["firstName"]);
    }

    #[test]
    fn test_whitelists_match_declared_fields() {
        fn all_fields(fields: &[&str]) -> Value {
            Value::Object(fields.iter().map(|f| (f.to_string(), Value::Null)).collect())
        }

        assert!(serde_json::from_value::<CreateUserRequest>(all_fields(CreateUserRequest::FIELDS)).is_ok());
        assert!(serde_json::from_value::<UpdateUserRequest>(all_fields(UpdateUserRequest::FIELDS)).is_ok());
        assert!(serde_json::from_value::<CreatePostRequest>(all_fields(CreatePostRequest::FIELDS)).is_ok());
        assert!(serde_json::from_value::<UpdatePostRequest>(all_fields(UpdatePostRequest::FIELDS)).is_ok());
    }

    #[test]
    fn test_null_age_clears_absent_age_keeps() {
        let clear: UpdateUserRequest = serde_json::from_value(json!({ "age": null })).unwrap();
        assert!(clear.validate().is_ok());
        assert_eq!(UserChanges::from(clear).age, Some(None));

        let keep: UpdateUserRequest = serde_json::from_value(json!({ "isActive": false })).unwrap();
        assert_eq!(UserChanges::from(keep).age, None);

        let bad: UpdateUserRequest = serde_json::from_value(json!({ "age": -1 })).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_empty_update_is_valid() {
        let req: UpdateUserRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.validate().is_ok());
        assert!(UserChanges::from(req).is_empty());
    }

    #[test]
    fn test_user_response_shape() {
        let now = Utc::now();
        let body = serde_json::to_value(UserResponse::from(User {
            id: 1,
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@x.com".into(),
            age: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }))
        .unwrap();

        assert_eq!(body["firstName"], "John");
        assert_eq!(body["isActive"], true);
        assert!(body["age"].is_null());
        assert!(body.get("createdAt").is_some());
    }
}
