//! Domain entities

mod friendship;
mod group;
mod hashtag;
mod health;
mod message;
mod notification;
mod post;
mod profile;

pub use friendship::{Friendship, FriendshipStatus};
pub use group::{ChatGroup, ChatGroupMessage, MAX_GROUP_NAME_LENGTH};
pub use hashtag::Hashtag;
pub use health::{ActivityLog, AppSession, MealLog, SleepLog};
pub use message::{ChatMessage, ConversationSummary, MAX_MESSAGE_LENGTH};
pub use notification::{Notification, NotificationKind};
pub use post::{Comment, Like, Post, MAX_COMMENT_LENGTH, MAX_POST_LENGTH};
pub use profile::UserProfile;
