//! PostgreSQL store implementations

mod health;
mod profile;
mod social;

pub use health::PgHealthLogStore;
pub use profile::PgProfileStore;
pub use social::PgSocialStore;
