//! # Quill Core
//!
//! The domain layer of the Quill API: users, their posts, the repository
//! ports that persistence must implement, and the services that sit on top.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::{PostsService, UsersService};
