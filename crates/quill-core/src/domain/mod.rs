//! Domain entities - the core business objects.

mod user;

mod post;

pub use post::{NewPost, Post, PostChanges};
pub use user::{NewUser, User, UserChanges};
