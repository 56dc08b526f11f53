//! Gateway services
//!
//! Services are thin structs borrowing a [`GatewayContext`]; handlers build
//! one per request. All social reads and writes go through the tiered
//! resolver in [`resolve`].

mod auth;
mod comment;
mod context;
mod dm;
mod error;
mod friendship;
mod group;
mod hashtag;
mod health_log;
mod like;
mod notification;
mod post;
mod resolve;

pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{GatewayContext, GatewayContextBuilder};
pub use dm::DmService;
pub use error::{GatewayError, GatewayResult, StoreFailure};
pub use friendship::FriendshipService;
pub use group::GroupService;
pub use hashtag::TrendingService;
pub use health_log::HealthLogService;
pub use like::LikeService;
pub use notification::NotificationService;
pub use post::PostService;
