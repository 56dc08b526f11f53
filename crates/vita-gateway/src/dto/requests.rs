//! Request DTOs with validation

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Password change request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,
}

/// Profile update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "Display name must be 1-50 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(url(message = "Avatar URL must be a valid URL"))]
    pub avatar_url: Option<String>,
}

// ============================================================================
// Social
// ============================================================================

/// Image payload attached to a new post
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Post creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(max = 2000, message = "Post content must be at most 2000 characters"))]
    pub content: String,

    /// Extra tags merged with the ones extracted from the content
    #[serde(default)]
    pub hashtags: Vec<String>,

    pub image: Option<ImageUpload>,
}

/// Comment creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(max = 500, message = "Comment must be at most 500 characters"))]
    pub content: String,
}

/// Direct message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub content: String,

    /// Render the content as a sticker instead of plain text
    #[serde(default)]
    pub is_sticker: bool,
}

/// Group channel creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Group name must be 1-100 characters"))]
    pub name: String,
}

/// Group chat message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendGroupMessageRequest {
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub content: String,

    /// Render the content as a sticker instead of plain text
    #[serde(default)]
    pub is_sticker: bool,
}

// ============================================================================
// Health logs
// ============================================================================

/// Meal log request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogMealRequest {
    #[validate(length(min = 1, max = 200, message = "Description must be 1-200 characters"))]
    pub description: String,

    #[validate(range(min = 0.0, max = 10000.0, message = "Calories out of range"))]
    pub calories: f64,

    #[validate(range(min = 0.0, max = 1000.0, message = "Protein out of range"))]
    pub protein: f64,

    #[validate(range(min = 0.0, max = 1000.0, message = "Carbs out of range"))]
    pub carbs: f64,

    #[validate(range(min = 0.0, max = 1000.0, message = "Fat out of range"))]
    pub fat: f64,

    pub logged_at: Option<DateTime<Utc>>,
}

/// Sleep log request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogSleepRequest {
    #[validate(range(min = 0.0, max = 24.0, message = "Duration out of range"))]
    pub duration_hours: f64,

    #[validate(range(min = 1, max = 10, message = "Quality must be 1-10"))]
    pub quality: u8,

    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// Activity log request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogActivityRequest {
    #[validate(range(min = 0, max = 200_000, message = "Steps out of range"))]
    pub steps: i64,

    #[validate(range(min = 0, max = 1440, message = "Active minutes out of range"))]
    pub active_minutes: i64,

    #[validate(range(min = 0, max = 20000, message = "Calories burned out of range"))]
    pub calories_burned: i64,

    pub logged_at: Option<DateTime<Utc>>,
}

/// App usage session request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogAppSessionRequest {
    #[validate(range(min = 1, max = 1440, message = "Duration out of range"))]
    pub duration_minutes: i64,

    pub started_at: DateTime<Utc>,
}
