//! Redis Pub/Sub module.
//!
//! Carries site change notifications from the web server to gateways.

mod channels;
mod publisher;
mod subscriber;

pub use channels::{PubSubChannel, SITE_CHANNEL_PREFIX};
pub use publisher::{PubSubEvent, Publisher};
pub use subscriber::{
    ReceivedMessage, Subscriber, SubscriberBuilder, SubscriberConfig, SubscriberError,
    SubscriberResult,
};
