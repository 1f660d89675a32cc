//! Redis Pub/Sub publisher.
//!
//! Publishes site change notifications so gateways can forward them to
//! open public pages.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;
use multisite_core::{SiteEvent, SiteUpdatedEvent, SITE_UPDATE};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Envelope carried on every Pub/Sub message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "SITE_UPDATE")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl PubSubEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Wrap a site event
    pub fn from_site_event(event: &SiteEvent) -> Result<Self, serde_json::Error> {
        let data = match event {
            SiteEvent::SiteUpdate(update) => serde_json::to_value(update)?,
        };
        Ok(Self::new(event.event_type(), data))
    }

    /// Decode the payload back into a site event.
    ///
    /// Returns `None` for event types this build does not know about.
    #[must_use]
    pub fn to_site_event(&self) -> Option<SiteEvent> {
        match self.event_type.as_str() {
            SITE_UPDATE => serde_json::from_value::<SiteUpdatedEvent>(self.data.clone())
                .ok()
                .map(SiteEvent::from),
            _ => None,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone, Debug)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel, returning the number of receivers
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let payload = event.to_json()?;
        let receivers: u32 = conn.publish(channel.name(), &payload).await?;

        tracing::debug!(
            channel = %channel,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a site event on its domain channel
    pub async fn publish_site_event(&self, event: &SiteEvent) -> RedisResult<u32> {
        let channel = PubSubChannel::site(event.domain());
        let envelope = PubSubEvent::from_site_event(event)?;
        self.publish(&channel, &envelope).await
    }
}
