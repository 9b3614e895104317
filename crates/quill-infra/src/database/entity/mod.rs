//! SeaORM entities. The schema itself is owned by the `migration` crate.

pub mod post;
pub mod user;
