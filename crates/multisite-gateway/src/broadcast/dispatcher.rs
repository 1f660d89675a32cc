//! Event dispatcher
//!
//! Receives site events from Redis Pub/Sub and dispatches them to the pages
//! of the matching domain. The Redis subscription follows the pages: a
//! domain's channel is subscribed when its first page connects and dropped
//! when its last page leaves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use multisite_cache::{PubSubChannel, ReceivedMessage, Subscriber, SubscriberBuilder, SubscriberError};
use multisite_core::SiteEvent;
use tokio::sync::broadcast;

use crate::connection::{ConnectionManager, DomainInterest, InterestReceiver};

/// Configuration for the event dispatcher
#[derive(Debug, Clone)]
pub struct EventDispatcherConfig {
    /// Redis URL
    pub redis_url: String,
    /// Broadcast buffer size
    pub broadcast_buffer: usize,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for EventDispatcherConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            broadcast_buffer: 1024,
            reconnect_delay_ms: 1000,
        }
    }
}

/// Event dispatcher that routes Redis Pub/Sub messages to WebSocket connections
pub struct EventDispatcher {
    /// Connection manager for sending messages
    connection_manager: Arc<ConnectionManager>,
    /// Redis subscriber
    subscriber: Subscriber,
    /// Whether the dispatcher is running
    running: AtomicBool,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    pub async fn new(
        config: EventDispatcherConfig,
        connection_manager: Arc<ConnectionManager>,
    ) -> Result<Self, SubscriberError> {
        let subscriber = SubscriberBuilder::new()
            .redis_url(&config.redis_url)
            .broadcast_buffer(config.broadcast_buffer)
            .reconnect_delay_ms(config.reconnect_delay_ms)
            .build()
            .await?;

        Ok(Self {
            connection_manager,
            subscriber,
            running: AtomicBool::new(false),
        })
    }

    /// Start the event dispatcher
    ///
    /// Spawns one task that follows domain interest and one that forwards
    /// received events to the connections.
    pub fn start(self: Arc<Self>, interests: InterestReceiver) {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("Event dispatcher is already running");
            return;
        }

        let tracker = Arc::clone(&self);
        tokio::spawn(async move {
            tracker.track_interest(interests).await;
        });

        let dispatcher = Arc::clone(&self);
        tokio::spawn(async move {
            dispatcher.run().await;
        });

        tracing::info!("Event dispatcher started");
    }

    /// Stop the event dispatcher
    pub async fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.subscriber.shutdown().await.ok();
        tracing::info!("Event dispatcher stopped");
    }

    /// Check if the dispatcher is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Check whether the subscriber currently holds a domain's channel
    pub async fn is_subscribed(&self, domain: &str) -> bool {
        self.subscriber
            .is_subscribed(&PubSubChannel::site(domain))
            .await
    }

    async fn track_interest(&self, mut interests: InterestReceiver) {
        while let Some(interest) = interests.recv().await {
            self.apply_interest(&interest).await;
        }
        tracing::debug!("Interest channel closed");
    }

    async fn apply_interest(&self, interest: &DomainInterest) {
        let result = match interest {
            DomainInterest::Acquired(domain) => {
                tracing::debug!(domain = %domain, "Subscribing to site channel");
                self.subscriber.subscribe(&[PubSubChannel::site(domain)]).await
            }
            DomainInterest::Released(domain) => {
                tracing::debug!(domain = %domain, "Unsubscribing from site channel");
                self.subscriber
                    .unsubscribe(&[PubSubChannel::site(domain)])
                    .await
            }
        };

        if let Err(e) = result {
            tracing::warn!(interest = ?interest, error = %e, "Failed to update site subscription");
        }
    }

    /// Run the event dispatcher loop
    async fn run(&self) {
        let mut receiver = self.subscriber.receiver();

        while self.running.load(Ordering::SeqCst) {
            match receiver.recv().await {
                Ok(msg) => {
                    self.handle_message(&msg);
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(lagged = n, "Event dispatcher lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::warn!("Event dispatcher channel closed");
                    break;
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        tracing::info!("Event dispatcher loop ended");
    }

    /// Forward one received message. Returns how many pages got it.
    fn handle_message(&self, msg: &ReceivedMessage) -> usize {
        let Some(event) = msg.site_event() else {
            tracing::debug!(
                channel = %msg.channel,
                "Received non-site message, ignoring"
            );
            return 0;
        };

        if let Some(channel_domain) = msg.channel.domain() {
            if !channel_domain.eq_ignore_ascii_case(event.domain()) {
                tracing::warn!(
                    channel = %msg.channel,
                    domain = %event.domain(),
                    "Event domain does not match its channel, ignoring"
                );
                return 0;
            }
        }

        let data = match &event {
            SiteEvent::SiteUpdate(update) => serde_json::to_value(update),
        };
        let data = match data {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode event payload");
                return 0;
            }
        };

        let sent = self
            .connection_manager
            .dispatch_to_domain(event.domain(), event.event_type(), &data);

        tracing::debug!(
            domain = %event.domain(),
            event_type = %event.event_type(),
            sent = sent,
            "Site event dispatched"
        );

        sent
    }
}

impl Drop for EventDispatcher {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
