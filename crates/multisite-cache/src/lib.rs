//! # multisite-cache
//!
//! Redis layer carrying site change notifications between processes.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Pub/Sub**: One channel per site domain (`site:{domain}`), published by the
//!   web server after a save and consumed by the gateway
//!
//! ## Example
//!
//! ```ignore
//! use multisite_cache::{Publisher, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = Publisher::new(pool);
//!
//! let event = SiteEvent::from(SiteUpdatedEvent::from_site(&site));
//! publisher.publish_site_event(&event).await?;
//! ```

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export pubsub types
pub use pubsub::{
    PubSubChannel, PubSubEvent, Publisher, ReceivedMessage, Subscriber, SubscriberBuilder,
    SubscriberConfig, SubscriberError, SubscriberResult, SITE_CHANNEL_PREFIX,
};
