//! Key naming scheme for the document store
//!
//! Documents live under `doc:*`, indexes under `idx:*`. Pair keys order the
//! two IDs so either direction maps to the same key.

use vita_core::Snowflake;

pub fn post(id: Snowflake) -> String {
    format!("doc:post:{id}")
}

pub fn post_counters(id: Snowflake) -> String {
    format!("doc:post:{id}:counters")
}

pub fn recent_posts() -> String {
    "idx:posts:recent".to_string()
}

pub fn posts_by_author(author_id: Snowflake) -> String {
    format!("idx:posts:author:{author_id}")
}

pub fn comment(id: Snowflake) -> String {
    format!("doc:comment:{id}")
}

pub fn comments_by_post(post_id: Snowflake) -> String {
    format!("idx:comments:post:{post_id}")
}

pub fn post_likes(post_id: Snowflake) -> String {
    format!("idx:likes:post:{post_id}")
}

pub fn message(id: Snowflake) -> String {
    format!("doc:dm:{id}")
}

pub fn message_pair(a: Snowflake, b: Snowflake) -> String {
    let (lo, hi) = ordered(a, b);
    format!("idx:dm:pair:{lo}:{hi}")
}

pub fn messages_by_user(user: Snowflake) -> String {
    format!("idx:dm:user:{user}")
}

pub fn sent_count(sender: Snowflake, recipient: Snowflake) -> String {
    format!("idx:dm:sent:{sender}:{recipient}")
}

pub fn unread_by_peer(recipient: Snowflake) -> String {
    format!("idx:dm:unread:{recipient}")
}

pub fn friendship(id: Snowflake) -> String {
    format!("doc:friendship:{id}")
}

pub fn friendship_pair(a: Snowflake, b: Snowflake) -> String {
    let (lo, hi) = ordered(a, b);
    format!("idx:friendship:pair:{lo}:{hi}")
}

pub fn friendships_by_user(user: Snowflake) -> String {
    format!("idx:friendships:user:{user}")
}

pub fn notification(id: Snowflake) -> String {
    format!("doc:notification:{id}")
}

pub fn notifications_by_user(recipient: Snowflake) -> String {
    format!("idx:notifications:user:{recipient}")
}

pub fn group(id: Snowflake) -> String {
    format!("doc:group:{id}")
}

pub fn group_counters(id: Snowflake) -> String {
    format!("doc:group:{id}:counters")
}

pub fn groups() -> String {
    "idx:groups:recent".to_string()
}

pub fn group_members(group_id: Snowflake) -> String {
    format!("idx:group:{group_id}:members")
}

pub fn group_message(id: Snowflake) -> String {
    format!("doc:groupmsg:{id}")
}

pub fn group_messages(group_id: Snowflake) -> String {
    format!("idx:group:{group_id}:messages")
}

pub fn hashtag_usage() -> String {
    "idx:hashtags:usage".to_string()
}

pub fn hashtag_last_used() -> String {
    "idx:hashtags:last_used".to_string()
}

fn ordered(a: Snowflake, b: Snowflake) -> (i64, i64) {
    let (a, b) = (a.into_inner(), b.into_inner());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_keys_are_direction_independent() {
        let a = Snowflake::new(10);
        let b = Snowflake::new(20);
        assert_eq!(message_pair(a, b), message_pair(b, a));
        assert_eq!(friendship_pair(a, b), friendship_pair(b, a));
        assert_eq!(message_pair(a, b), "idx:dm:pair:10:20");
    }

    #[test]
    fn sent_count_is_directional() {
        let a = Snowflake::new(10);
        let b = Snowflake::new(20);
        assert_ne!(sent_count(a, b), sent_count(b, a));
    }
}
