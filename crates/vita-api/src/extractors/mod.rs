//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and path parameters.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{CommentIdPath, GroupIdPath, IdPath, PostIdPath, UserIdPath};
pub use validated::ValidatedJson;
