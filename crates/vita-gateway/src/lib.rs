//! # vita-gateway
//!
//! Application layer sitting between the HTTP API and the storage backends.
//!
//! Every social read and write goes through a [`GatewayContext`] holding an
//! ordered list of [`SocialStore`](vita_core::SocialStore) backends. An
//! operation runs against the first backend; if that backend reports a
//! recoverable fault (missing relation, connection loss) the gateway retries
//! the same operation against the next backend in the list. Only when every
//! backend has failed does the caller see an error, carrying the per-backend
//! failure list.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, ChangePasswordRequest, CreateCommentRequest, CreateGroupRequest,
    CreatePostRequest, FriendRequestOutcome, GroupMembershipOutcome, ImageUpload, LikeOutcome,
    LogActivityRequest, LogAppSessionRequest, LogMealRequest, LogSleepRequest, LoginRequest,
    RefreshTokenRequest, RegisterRequest, SendGroupMessageRequest, SendMessageRequest,
    TrendingTags, UpdateProfileRequest,
};
pub use services::{
    AuthService, CommentService, DmService, FriendshipService, GatewayContext,
    GatewayContextBuilder, GatewayError, GatewayResult, GroupService, HealthLogService,
    LikeService, NotificationService, PostService, StoreFailure, TrendingService,
};
