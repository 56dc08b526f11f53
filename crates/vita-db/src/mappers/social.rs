//! Social entity <-> model mappers

use vita_core::entities::{
    ChatGroup, ChatGroupMessage, ChatMessage, Comment, Friendship, FriendshipStatus, Hashtag,
    Like, Notification, NotificationKind, Post,
};
use vita_core::Snowflake;

use crate::models::{
    CommentModel, FriendshipModel, GroupMessageModel, GroupModel, HashtagModel, LikeModel,
    MessageModel, NotificationModel, PostModel,
};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            author_name: model.author_name,
            author_avatar_url: model.author_avatar_url,
            content: model.content,
            image_url: model.image_url,
            hashtags: model.hashtags,
            like_count: model.like_count,
            comment_count: model.comment_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            author_id: Snowflake::new(model.author_id),
            author_name: model.author_name,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

impl From<LikeModel> for Like {
    fn from(model: LikeModel) -> Self {
        Like {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
        }
    }
}

impl From<MessageModel> for ChatMessage {
    fn from(model: MessageModel) -> Self {
        ChatMessage {
            id: Snowflake::new(model.id),
            sender_id: Snowflake::new(model.sender_id),
            sender_name: model.sender_name,
            recipient_id: Snowflake::new(model.recipient_id),
            content: model.content,
            is_sticker: model.is_sticker,
            read: model.read,
            created_at: model.created_at,
        }
    }
}

impl From<GroupModel> for ChatGroup {
    fn from(model: GroupModel) -> Self {
        ChatGroup {
            id: Snowflake::new(model.id),
            name: model.name,
            owner_id: Snowflake::new(model.owner_id),
            member_count: model.member_count,
            created_at: model.created_at,
        }
    }
}

impl From<GroupMessageModel> for ChatGroupMessage {
    fn from(model: GroupMessageModel) -> Self {
        ChatGroupMessage {
            id: Snowflake::new(model.id),
            group_id: Snowflake::new(model.group_id),
            sender_id: Snowflake::new(model.sender_id),
            sender_name: model.sender_name,
            content: model.content,
            is_sticker: model.is_sticker,
            created_at: model.created_at,
        }
    }
}

impl From<FriendshipModel> for Friendship {
    fn from(model: FriendshipModel) -> Self {
        Friendship {
            id: Snowflake::new(model.id),
            requester_id: Snowflake::new(model.requester_id),
            addressee_id: Snowflake::new(model.addressee_id),
            // Status column is constrained by a CHECK, unknown values cannot occur
            status: FriendshipStatus::parse(&model.status).unwrap_or(FriendshipStatus::Pending),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: Snowflake::new(model.id),
            recipient_id: Snowflake::new(model.recipient_id),
            actor_id: Snowflake::new(model.actor_id),
            actor_name: model.actor_name,
            kind: NotificationKind::parse(&model.kind).unwrap_or(NotificationKind::Message),
            body: model.body,
            subject_id: model.subject_id.map(Snowflake::new),
            read: model.read,
            created_at: model.created_at,
        }
    }
}

impl From<HashtagModel> for Hashtag {
    fn from(model: HashtagModel) -> Self {
        Hashtag {
            name: model.name,
            use_count: model.use_count,
            last_used_at: model.last_used_at,
        }
    }
}
