//! Document store implementations

mod doc_social;

pub use doc_social::DocSocialStore;
