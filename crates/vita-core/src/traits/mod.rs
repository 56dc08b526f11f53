//! Capability traits implemented by the storage backends

mod stores;

pub use stores::{
    FileStore, FileStoreRef, HealthLogStore, HealthLogStoreRef, ProfileStore, ProfileStoreRef,
    SocialStore, SocialStoreRef, StoreResult,
};
