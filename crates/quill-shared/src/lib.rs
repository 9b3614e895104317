//! # Quill Shared
//!
//! Wire types of the HTTP API: validated request bodies, response bodies
//! and RFC 7807 error documents.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
