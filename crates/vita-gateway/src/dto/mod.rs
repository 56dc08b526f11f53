//! Data transfer objects for gateway requests and responses
//!
//! Request DTOs carry `validator` rules; services call `.validate()` before
//! touching any backend.

pub mod requests;
pub mod responses;

pub use requests::{
    ChangePasswordRequest, CreateCommentRequest, CreateGroupRequest, CreatePostRequest,
    ImageUpload, LogActivityRequest, LogAppSessionRequest, LogMealRequest, LogSleepRequest,
    LoginRequest, RefreshTokenRequest, RegisterRequest, SendGroupMessageRequest,
    SendMessageRequest, UpdateProfileRequest,
};
pub use responses::{
    AuthResponse, FriendRequestOutcome, GroupMembershipOutcome, LikeOutcome, TrendingTags,
};
