//! Request validation - the global whitelist/validation policy.
//!
//! Bodies must be JSON objects. Undeclared properties are stripped and
//! reported, the rest is deserialized into the DTO and checked with its
//! `validator` rules; every violation found lands in the same 400 problem
//! document. Path ids must be numeric.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;
use quill_shared::dto::{Whitelist, strip_undeclared, violations};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use super::error::AppError;

/// JSON body extractor that also runs the DTO's validation rules.
///
/// ```ignore
/// async fn create(body: ValidatedJson<CreateUserRequest>) -> AppResult<HttpResponse> {
///     let req = body.into_inner();
///     ...
/// }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Whitelist + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let json = web::Json::<Map<String, Value>>::from_request(req, payload);

        Box::pin(async move {
            let body = json.await?.into_inner();
            Ok(ValidatedJson(check_body(body)?))
        })
    }
}

/// Whitelist, deserialize and validate `body`, collecting every violation.
fn check_body<T>(mut body: Map<String, Value>) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate + Whitelist,
{
    let mut errors = strip_undeclared(&mut body, T::FIELDS);

    match serde_json::from_value::<T>(Value::Object(body)) {
        Ok(value) => match value.validate() {
            Ok(()) if errors.is_empty() => return Ok(value),
            Ok(()) => {}
            Err(rules) => errors.extend(violations(&rules)),
        },
        // Wrong JSON type for a declared field
        Err(e) => errors.push(e.to_string()),
    }

    Err(AppError::Validation(errors))
}

/// JSON extractor settings: malformed or non-whitelisted bodies are validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        tracing::debug!(path = %req.path(), error = %err, "Rejected request body");
        json_error(err).into()
    })
}

/// Path extractor settings: non-numeric ids are bad requests.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        tracing::debug!(path = %req.path(), error = %err, "Rejected path parameter");
        path_error(err).into()
    })
}

fn json_error(err: JsonPayloadError) -> AppError {
    match err {
        JsonPayloadError::Deserialize(e) => AppError::Validation(vec![e.to_string()]),
        JsonPayloadError::ContentType => {
            AppError::BadRequest("Content-Type must be application/json".to_string())
        }
        other => AppError::BadRequest(other.to_string()),
    }
}

fn path_error(_err: PathError) -> AppError {
    AppError::BadRequest("Validation failed (numeric string is expected)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_shared::dto::{CreateUserRequest, UpdatePostRequest};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn errors_of(result: Result<impl std::fmt::Debug, AppError>) -> Vec<String> {
        match result {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_collects_every_violation() {
        let body = object(json!({ "lastName": "Doe", "email": "nope", "role": "admin" }));

        let errors = errors_of(check_body::<CreateUserRequest>(body));

        assert_eq!(
            errors,
            vec![
                "property role should not exist",
                "email must be an email",
                "firstName should not be empty",
            ]
        );
    }

    #[test]
    fn test_undeclared_property_alone_is_rejected() {
        let errors = errors_of(check_body::<UpdatePostRequest>(object(json!({ "views": 3 }))));
        assert_eq!(errors, vec!["property views should not exist"]);
    }

    #[test]
    fn test_wrong_type_is_reported_with_undeclared() {
        let body = object(json!({ "title": 5, "extra": true }));

        let errors = errors_of(check_body::<UpdatePostRequest>(body));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "property extra should not exist");
        assert!(errors[1].contains("invalid type"));
    }

    #[test]
    fn test_valid_body_passes() {
        let req = check_body::<UpdatePostRequest>(object(json!({ "isPublished": true }))).unwrap();
        assert_eq!(req.is_published, Some(true));
    }
}
