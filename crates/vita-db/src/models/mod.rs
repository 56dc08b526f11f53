//! Database models with SQLx `FromRow` derives

mod health;
mod profile;
mod social;

pub use health::{ActivityModel, AppSessionModel, MealModel, SleepModel};
pub use profile::ProfileModel;
pub use social::{
    CommentModel, FriendshipModel, GroupMessageModel, GroupModel, HashtagModel, LikeModel,
    MessageModel, NotificationModel, PostModel,
};
