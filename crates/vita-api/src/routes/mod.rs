//! Route definitions
//!
//! Versioned API routes mounted under `/api/v1`, plus unauthenticated
//! health probes at the root.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Build the full application router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_routes())
        .merge(health_routes())
}

/// Health probe routes (no authentication)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
}

/// Versioned API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(message_routes())
        .merge(group_routes())
        .merge(friend_routes())
        .merge(notification_routes())
        .merge(hashtag_routes())
        .merge(analytics_routes())
        .merge(log_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/password", patch(handlers::auth::change_password))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(handlers::users::me).patch(handlers::users::update_me),
        )
        .route("/users/@me/avatar", put(handlers::users::update_avatar))
        .route("/users/:user_id/posts", get(handlers::users::user_posts))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/feed", get(handlers::posts::feed))
        .route("/posts", post(handlers::posts::create_post))
        .route(
            "/posts/:post_id",
            get(handlers::posts::get_post).delete(handlers::posts::delete_post),
        )
        .route(
            "/posts/:post_id/comments",
            get(handlers::comments::list_comments).post(handlers::comments::create_comment),
        )
        .route(
            "/posts/:post_id/like",
            put(handlers::likes::like_post).delete(handlers::likes::unlike_post),
        )
        .route(
            "/comments/:comment_id",
            delete(handlers::comments::delete_comment),
        )
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(handlers::messages::conversations))
        .route(
            "/messages/:user_id",
            get(handlers::messages::conversation).post(handlers::messages::send_message),
        )
        .route("/messages/:user_id/read", post(handlers::messages::mark_read))
}

fn group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            get(handlers::groups::list_groups).post(handlers::groups::create_group),
        )
        .route("/groups/:group_id/join", post(handlers::groups::join_group))
        .route("/groups/:group_id/leave", post(handlers::groups::leave_group))
        .route(
            "/groups/:group_id/messages",
            get(handlers::groups::group_messages).post(handlers::groups::send_group_message),
        )
}

fn friend_routes() -> Router<AppState> {
    Router::new()
        .route("/friends", get(handlers::friends::list_friends))
        .route("/friends/requests", get(handlers::friends::pending_requests))
        .route(
            "/friends/requests/:id/respond",
            post(handlers::friends::respond),
        )
        .route(
            "/friends/:user_id",
            post(handlers::friends::send_request).delete(handlers::friends::unfriend),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notifications::list_notifications),
        )
        .route(
            "/notifications/:id/read",
            post(handlers::notifications::mark_read),
        )
}

fn hashtag_routes() -> Router<AppState> {
    Router::new().route("/hashtags/trending", get(handlers::hashtags::trending))
}

fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/nutrition", get(handlers::analytics::nutrition))
        .route("/analytics/sleep", get(handlers::analytics::sleep))
        .route("/analytics/activity", get(handlers::analytics::activity))
        .route("/analytics/app-usage", get(handlers::analytics::app_usage))
}

fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/logs/meals", post(handlers::logs::log_meal))
        .route("/logs/sleep", post(handlers::logs::log_sleep))
        .route("/logs/activity", post(handlers::logs::log_activity))
        .route("/logs/app-sessions", post(handlers::logs::log_app_session))
}
