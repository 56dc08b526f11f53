//! Pub/Sub event fan-out

mod channels;
mod publisher;

pub use channels::EventChannel;
pub use publisher::{EventPublisher, SocialEvent};
