//! Integration test utilities.
//!
//! `doubles` and `fixtures` back the in-process gateway tests; `helpers`
//! spawns a live API server for end-to-end tests when PostgreSQL and Redis
//! are available.

pub mod doubles;
pub mod fixtures;
pub mod helpers;

pub use doubles::*;
pub use fixtures::*;
pub use helpers::*;
