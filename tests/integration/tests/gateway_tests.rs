//! Gateway behavior tests over in-memory backends.
//!
//! These run without PostgreSQL or Redis: the store doubles implement the
//! same capability traits the real backends do.

use std::sync::Arc;

use integration_tests::{
    gateway_with_file_stores, gateway_with_store, gateway_with_stores, register_user,
    FailingFileStore, FailingSocialStore, FailureMode, MemoryFileStore, MemoryHealthLogStore,
    MemorySocialStore,
};
use vita_analytics::AnalyticsService;
use vita_core::{FriendshipStatus, SnowflakeGenerator};
use vita_gateway::{
    CommentService, CreateCommentRequest, CreateGroupRequest, CreatePostRequest, DmService,
    FriendshipService, GatewayError, GroupService, ImageUpload, LikeService, PostService,
    SendGroupMessageRequest, SendMessageRequest, TrendingService,
};

fn post_request(content: &str) -> CreatePostRequest {
    CreatePostRequest {
        content: content.to_string(),
        hashtags: Vec::new(),
        image: None,
    }
}

// ============================================================================
// Backend fallback
// ============================================================================

#[tokio::test]
async fn failing_primary_falls_through_to_secondary() {
    let primary = Arc::new(FailingSocialStore::new("primary", FailureMode::MissingRelation));
    let secondary = Arc::new(MemorySocialStore::new("secondary"));
    let gateway = gateway_with_stores(vec![primary.clone(), secondary.clone()]);

    let author = register_user(&gateway.ctx, "alice").await;
    let service = PostService::new(&gateway.ctx);
    let post = service
        .create_post(&author, post_request("hello world"))
        .await
        .expect("secondary should serve the write");

    assert_eq!(post.content, "hello world");
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 1, "secondary invoked exactly once");
    assert_eq!(secondary.post_count(), 1);
}

#[tokio::test]
async fn exhausted_chain_aggregates_failures() {
    let primary = Arc::new(FailingSocialStore::new("primary", FailureMode::MissingRelation));
    let secondary = Arc::new(FailingSocialStore::new("secondary", FailureMode::Unavailable));
    let gateway = gateway_with_stores(vec![primary.clone(), secondary.clone()]);

    let author = register_user(&gateway.ctx, "alice").await;
    let service = PostService::new(&gateway.ctx);
    let err = service
        .create_post(&author, post_request("hello"))
        .await
        .expect_err("no backend can serve the write");

    match err {
        GatewayError::AllStoresFailed { operation, failures } => {
            assert_eq!(operation, "create_post");
            assert_eq!(failures.len(), 2);
            assert_eq!(failures[0].store, "primary");
            assert_eq!(failures[1].store, "secondary");
        }
        other => panic!("expected AllStoresFailed, got {other:?}"),
    }
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 1);
}

#[tokio::test]
async fn domain_errors_do_not_fall_through() {
    let primary = Arc::new(MemorySocialStore::new("primary"));
    let secondary = Arc::new(MemorySocialStore::new("secondary"));
    let gateway = gateway_with_stores(vec![primary.clone(), secondary.clone()]);

    let generator = SnowflakeGenerator::new(9);
    let missing = generator.generate();

    let service = PostService::new(&gateway.ctx);
    let err = service.post(missing).await.expect_err("post does not exist");
    assert!(matches!(err, GatewayError::Domain(_)));
    assert_eq!(
        secondary.calls(),
        0,
        "a not-found answer from the primary is final"
    );
}

#[tokio::test]
async fn exhausted_chain_degrades_list_reads_to_empty() {
    let primary = Arc::new(FailingSocialStore::new("primary", FailureMode::Unavailable));
    let gateway = gateway_with_stores(vec![primary]);

    let service = PostService::new(&gateway.ctx);
    let posts = service.feed(None).await.expect("feed degrades to empty");
    assert!(posts.is_empty());
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn image_only_posts_are_accepted() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let service = PostService::new(&gateway.ctx);

    let post = service
        .create_post(
            &alice,
            CreatePostRequest {
                content: String::new(),
                hashtags: Vec::new(),
                image: Some(ImageUpload {
                    file_name: "sunset.png".to_string(),
                    bytes: vec![1, 2, 3, 4],
                }),
            },
        )
        .await
        .expect("a post can carry an image with no text");

    assert!(post.content.is_empty());
    let image_url = post.image_url.expect("image url is set");
    assert!(image_url.ends_with(".png"));
    assert_eq!(store.post_count(), 1);
    assert_eq!(gateway.files.stored_paths().len(), 1);

    let err = service
        .create_post(&alice, post_request("   "))
        .await
        .expect_err("a post with neither text nor image is rejected");
    assert!(matches!(err, GatewayError::Validation(_)));
}

#[tokio::test]
async fn new_posts_notify_every_other_user() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let bob = register_user(&gateway.ctx, "bob").await;
    let carol = register_user(&gateway.ctx, "carol").await;

    let service = PostService::new(&gateway.ctx);
    service
        .create_post(&alice, post_request("morning run done"))
        .await
        .unwrap();

    assert_eq!(store.notification_rows(bob.id), 1);
    assert_eq!(store.notification_rows(carol.id), 1);
    assert_eq!(
        store.notification_rows(alice.id),
        0,
        "the author is not notified about their own post"
    );
}

#[tokio::test]
async fn image_upload_falls_through_to_secondary_file_store() {
    let broken = Arc::new(FailingFileStore::new());
    let files = Arc::new(MemoryFileStore::new());
    let gateway = gateway_with_file_stores(
        vec![Arc::new(MemorySocialStore::new("memory"))],
        vec![broken.clone(), files.clone()],
        files.clone(),
    );

    let alice = register_user(&gateway.ctx, "alice").await;
    let service = PostService::new(&gateway.ctx);
    let post = service
        .create_post(
            &alice,
            CreatePostRequest {
                content: "view from the summit".to_string(),
                hashtags: Vec::new(),
                image: Some(ImageUpload {
                    file_name: "summit.jpg".to_string(),
                    bytes: vec![0xFF, 0xD8, 0xFF],
                }),
            },
        )
        .await
        .expect("secondary file store serves the upload");

    assert!(post.image_url.is_some());
    assert_eq!(broken.calls(), 1, "primary was tried first");
    assert_eq!(files.stored_paths().len(), 1);
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn comment_survives_counter_backend_failure() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let bob = register_user(&gateway.ctx, "bob").await;

    let posts = PostService::new(&gateway.ctx);
    let post = posts.create_post(&alice, post_request("thoughts?")).await.unwrap();

    store.set_counter_failures(true);
    let service = CommentService::new(&gateway.ctx);
    let comment = service
        .create_comment(
            &bob,
            post.id,
            CreateCommentRequest {
                content: "nice one".to_string(),
            },
        )
        .await
        .expect("the comment row outlives the counter failure");

    assert_eq!(comment.content, "nice one");
    assert_eq!(store.comment_rows(post.id), 1);

    store.set_counter_failures(false);
    let fetched = posts.post(post.id).await.unwrap();
    assert_eq!(fetched.comment_count, 0, "counter bump was skipped");
}

// ============================================================================
// Group channels
// ============================================================================

#[tokio::test]
async fn group_join_is_idempotent_and_leave_floors_at_zero() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let bob = register_user(&gateway.ctx, "bob").await;

    let service = GroupService::new(&gateway.ctx);
    let group = service
        .create_group(
            &alice,
            CreateGroupRequest {
                name: "trail runners".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(group.member_count, 1, "the owner joins on creation");

    let joined = service.join(bob.id, group.id).await.unwrap();
    assert!(joined.changed);
    assert_eq!(joined.member_count, 2);

    let again = service.join(bob.id, group.id).await.unwrap();
    assert!(!again.changed, "joining twice reports no change");
    assert_eq!(again.member_count, 2);
    assert_eq!(store.group_member_rows(group.id), 2);

    let left = service.leave(bob.id, group.id).await.unwrap();
    assert!(left.changed);
    assert_eq!(left.member_count, 1);

    let left_again = service.leave(bob.id, group.id).await.unwrap();
    assert!(!left_again.changed, "leaving without a membership is a no-op");
    assert_eq!(left_again.member_count, 1);

    let owner_left = service.leave(alice.id, group.id).await.unwrap();
    assert_eq!(owner_left.member_count, 0, "counter never goes negative");
}

#[tokio::test]
async fn group_messages_fall_through_to_secondary() {
    let primary = Arc::new(FailingSocialStore::new("primary", FailureMode::Unavailable));
    let secondary = Arc::new(MemorySocialStore::new("secondary"));
    let gateway = gateway_with_stores(vec![primary.clone(), secondary.clone()]);

    let alice = register_user(&gateway.ctx, "alice").await;
    let service = GroupService::new(&gateway.ctx);
    let group = service
        .create_group(
            &alice,
            CreateGroupRequest {
                name: "night owls".to_string(),
            },
        )
        .await
        .expect("secondary serves the group write");

    let message = service
        .send_message(
            &alice,
            group.id,
            SendGroupMessageRequest {
                content: "anyone awake?".to_string(),
                is_sticker: false,
            },
        )
        .await
        .expect("secondary serves the message write");

    assert_eq!(message.sender_name, "alice");
    assert_eq!(secondary.group_message_count(), 1);

    let history = service.messages(group.id, None).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn messaging_an_unknown_group_is_rejected() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let missing = SnowflakeGenerator::new(9).generate();

    let service = GroupService::new(&gateway.ctx);
    let err = service
        .send_message(
            &alice,
            missing,
            SendGroupMessageRequest {
                content: "hello?".to_string(),
                is_sticker: false,
            },
        )
        .await
        .expect_err("the group does not exist");

    assert!(matches!(err, GatewayError::Domain(_)));
    assert_eq!(store.group_message_count(), 0);
}

// ============================================================================
// Direct messages
// ============================================================================

#[tokio::test]
async fn non_friends_hit_message_cap_at_two() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let bob = register_user(&gateway.ctx, "bob").await;

    let service = DmService::new(&gateway.ctx);
    for text in ["hey", "you there?"] {
        service
            .send_message(
                &alice,
                bob.id,
                SendMessageRequest {
                    content: text.to_string(),
                    is_sticker: false,
                },
            )
            .await
            .expect("first two messages pass");
    }

    let err = service
        .send_message(
            &alice,
            bob.id,
            SendMessageRequest {
                content: "hello??".to_string(),
                is_sticker: false,
            },
        )
        .await
        .expect_err("third message to a non-friend is rejected");

    assert!(matches!(err, GatewayError::MessageLimitReached { cap: 2 }));
    assert_eq!(store.message_count(), 2, "no third row was written");
    assert_eq!(
        store.friendship_rows(),
        1,
        "first message opened a pending friendship"
    );
}

#[tokio::test]
async fn friends_are_not_capped() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let bob = register_user(&gateway.ctx, "bob").await;

    let friendships = FriendshipService::new(&gateway.ctx);
    friendships.send_request(&alice, bob.id).await.unwrap();
    friendships.send_request(&bob, alice.id).await.unwrap();

    let service = DmService::new(&gateway.ctx);
    for i in 0..5 {
        service
            .send_message(
                &alice,
                bob.id,
                SendMessageRequest {
                    content: format!("message {i}"),
                    is_sticker: false,
                },
            )
            .await
            .expect("friends can keep messaging");
    }
    assert_eq!(store.message_count(), 5);
}

// ============================================================================
// Likes
// ============================================================================

#[tokio::test]
async fn liking_twice_is_idempotent() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let bob = register_user(&gateway.ctx, "bob").await;

    let posts = PostService::new(&gateway.ctx);
    let post = posts.create_post(&alice, post_request("look!")).await.unwrap();

    let service = LikeService::new(&gateway.ctx);
    let first = service.like(&bob, post.id).await.unwrap();
    assert!(first.changed);
    assert_eq!(first.like_count, 1);

    let second = service.like(&bob, post.id).await.unwrap();
    assert!(!second.changed, "second like reports no change");
    assert_eq!(second.like_count, 1);
    assert_eq!(store.like_rows(post.id), 1, "exactly one like row");
}

#[tokio::test]
async fn unlike_at_zero_keeps_counter_at_zero() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let bob = register_user(&gateway.ctx, "bob").await;

    let posts = PostService::new(&gateway.ctx);
    let post = posts.create_post(&alice, post_request("nothing yet")).await.unwrap();

    let service = LikeService::new(&gateway.ctx);
    let outcome = service.unlike(bob.id, post.id).await.unwrap();
    assert!(!outcome.changed);
    assert_eq!(outcome.like_count, 0);

    service.like(&bob, post.id).await.unwrap();
    service.unlike(bob.id, post.id).await.unwrap();
    let again = service.unlike(bob.id, post.id).await.unwrap();
    assert!(!again.changed);
    assert_eq!(again.like_count, 0, "counter never goes negative");
}

// ============================================================================
// Hashtags
// ============================================================================

#[tokio::test]
async fn hashtags_are_normalized_and_upserted() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let posts = PostService::new(&gateway.ctx);
    posts
        .create_post(&alice, post_request("new year resolution #Health"))
        .await
        .unwrap();
    posts
        .create_post(&alice, post_request("#health check complete"))
        .await
        .unwrap();

    assert_eq!(store.hashtag_rows(), 1, "one tag row for both casings");
    assert_eq!(store.hashtag_use_count("health"), Some(2));
}

#[tokio::test]
async fn trending_serves_curated_tags_when_store_is_down() {
    let primary = Arc::new(FailingSocialStore::new("primary", FailureMode::Unavailable));
    let gateway = gateway_with_stores(vec![primary]);

    let service = TrendingService::new(&gateway.ctx);
    let trending = service.trending(Some(5)).await.unwrap();
    assert!(trending.curated);
    assert_eq!(trending.tags.len(), 5);
}

// ============================================================================
// Friendships
// ============================================================================

#[tokio::test]
async fn counter_request_accepts_the_existing_edge() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let bob = register_user(&gateway.ctx, "bob").await;

    let service = FriendshipService::new(&gateway.ctx);
    let first = service.send_request(&alice, bob.id).await.unwrap();
    assert!(!first.auto_accepted);
    assert_eq!(first.friendship.status, FriendshipStatus::Pending);

    let second = service.send_request(&bob, alice.id).await.unwrap();
    assert!(second.auto_accepted, "reverse request accepts the edge");
    assert_eq!(second.friendship.status, FriendshipStatus::Accepted);
    assert_eq!(second.friendship.id, first.friendship.id);
    assert_eq!(store.friendship_rows(), 1, "no duplicate edge");
}

#[tokio::test]
async fn duplicate_request_reports_already_sent() {
    let store = Arc::new(MemorySocialStore::new("memory"));
    let gateway = gateway_with_store(store.clone());

    let alice = register_user(&gateway.ctx, "alice").await;
    let bob = register_user(&gateway.ctx, "bob").await;

    let service = FriendshipService::new(&gateway.ctx);
    let first = service.send_request(&alice, bob.id).await.unwrap();
    let resend = service.send_request(&alice, bob.id).await.unwrap();

    assert!(!resend.auto_accepted);
    assert_eq!(resend.message, "Friend request already sent");
    assert_eq!(resend.friendship.id, first.friendship.id);
    assert_eq!(store.friendship_rows(), 1);
}

// ============================================================================
// Analytics
// ============================================================================

#[tokio::test]
async fn empty_nutrition_window_serves_synthetic_series() {
    let store = Arc::new(MemoryHealthLogStore::new());
    let service = AnalyticsService::new(store, 7);

    let user_id = SnowflakeGenerator::new(1).generate();
    let summary = service.nutrition_summary(user_id, Some(7)).await.unwrap();

    assert!(summary.synthetic, "empty window is flagged synthetic");
    assert_eq!(summary.days.len(), 7, "one point per calendar day");
    for day in &summary.days {
        assert!(
            (1800.0..=2200.0).contains(&day.calories),
            "calories {} outside the synthetic band",
            day.calories
        );
    }
}
