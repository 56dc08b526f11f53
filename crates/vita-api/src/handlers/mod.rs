//! HTTP request handlers

pub mod analytics;
pub mod auth;
pub mod comments;
pub mod friends;
pub mod groups;
pub mod hashtags;
pub mod health;
pub mod likes;
pub mod logs;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod users;
