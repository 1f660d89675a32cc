//! Redis Pub/Sub subscriber.
//!
//! A single background task owns the Redis Pub/Sub connection. Callers add and
//! remove channels through a command queue and read incoming messages from a
//! broadcast receiver. The subscribed set survives reconnects.

use crate::pubsub::{PubSubChannel, PubSubEvent};
use futures_util::StreamExt;
use multisite_core::SiteEvent;
use redis::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, RwLock};

/// Error type for subscriber operations
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Failed to parse event: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Subscriber task stopped")]
    ChannelClosed,
}

/// Result type for subscriber operations
pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// Message received from Pub/Sub
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    /// Channel the message was received on
    pub channel: PubSubChannel,
    /// Parsed envelope (if valid JSON)
    pub event: Option<PubSubEvent>,
    /// Raw payload
    pub payload: String,
}

impl ReceivedMessage {
    fn from_redis(channel_name: &str, payload: String) -> Self {
        Self {
            channel: PubSubChannel::parse(channel_name),
            event: serde_json::from_str(&payload).ok(),
            payload,
        }
    }

    /// Site event carried by this message, if any
    #[must_use]
    pub fn site_event(&self) -> Option<SiteEvent> {
        self.event.as_ref().and_then(PubSubEvent::to_site_event)
    }
}

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Redis connection URL
    pub redis_url: String,
    /// Capacity of the broadcast channel handed to receivers
    pub broadcast_buffer: usize,
    /// Delay before reconnecting after a connection failure
    pub reconnect_delay_ms: u64,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            broadcast_buffer: 1024,
            reconnect_delay_ms: 1000,
        }
    }
}

#[derive(Debug)]
enum Command {
    Subscribe(Vec<PubSubChannel>),
    Unsubscribe(Vec<PubSubChannel>),
    Shutdown,
}

/// How a connected session ended
enum SessionEnd {
    Shutdown,
    Disconnected,
}

type ChannelSet = Arc<RwLock<HashSet<PubSubChannel>>>;

/// Redis Pub/Sub subscriber handle
pub struct Subscriber {
    subscribed: ChannelSet,
    broadcast_tx: broadcast::Sender<ReceivedMessage>,
    control_tx: mpsc::Sender<Command>,
}

impl Subscriber {
    /// Create a subscriber and start its background task
    pub fn start(config: SubscriberConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(config.broadcast_buffer);
        let (control_tx, control_rx) = mpsc::channel(64);
        let subscribed: ChannelSet = Arc::new(RwLock::new(HashSet::new()));

        let task = ListenerTask {
            config,
            subscribed: subscribed.clone(),
            broadcast_tx: broadcast_tx.clone(),
        };
        tokio::spawn(task.run(control_rx));

        Self {
            subscribed,
            broadcast_tx,
            control_tx,
        }
    }

    /// Subscribe to channels
    pub async fn subscribe(&self, channels: &[PubSubChannel]) -> SubscriberResult<()> {
        self.send(Command::Subscribe(channels.to_vec())).await
    }

    /// Unsubscribe from channels
    pub async fn unsubscribe(&self, channels: &[PubSubChannel]) -> SubscriberResult<()> {
        self.send(Command::Unsubscribe(channels.to_vec())).await
    }

    /// Get a receiver for incoming messages
    #[must_use]
    pub fn receiver(&self) -> broadcast::Receiver<ReceivedMessage> {
        self.broadcast_tx.subscribe()
    }

    pub async fn is_subscribed(&self, channel: &PubSubChannel) -> bool {
        self.subscribed.read().await.contains(channel)
    }

    /// Stop the background task
    pub async fn shutdown(&self) -> SubscriberResult<()> {
        self.send(Command::Shutdown).await
    }

    async fn send(&self, command: Command) -> SubscriberResult<()> {
        self.control_tx
            .send(command)
            .await
            .map_err(|_| SubscriberError::ChannelClosed)
    }
}

struct ListenerTask {
    config: SubscriberConfig,
    subscribed: ChannelSet,
    broadcast_tx: broadcast::Sender<ReceivedMessage>,
}

impl ListenerTask {
    async fn run(self, mut control_rx: mpsc::Receiver<Command>) {
        let delay = Duration::from_millis(self.config.reconnect_delay_ms);
        loop {
            match self.session(&mut control_rx).await {
                Ok(SessionEnd::Shutdown) => {
                    tracing::info!("Subscriber shutting down");
                    break;
                }
                Ok(SessionEnd::Disconnected) => {
                    tracing::warn!("Pub/Sub stream ended, reconnecting");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Subscriber error, reconnecting");
                }
            }
            // Keep accepting commands while disconnected
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                cmd = control_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => {
                        tracing::info!("Subscriber shutting down");
                        break;
                    }
                    Some(cmd) => self.record(&cmd).await,
                },
            }
        }
    }

    /// Apply a command to the subscribed set only.
    ///
    /// Runs before Redis is asked, so whatever a session fails to apply is
    /// restored by the next one.
    async fn record(&self, command: &Command) {
        let mut subscribed = self.subscribed.write().await;
        match command {
            Command::Subscribe(channels) => subscribed.extend(channels.iter().cloned()),
            Command::Unsubscribe(channels) => {
                for channel in channels {
                    subscribed.remove(channel);
                }
            }
            Command::Shutdown => {}
        }
    }

    /// One connected session: resubscribe, then pump messages and commands
    async fn session(
        &self,
        control_rx: &mut mpsc::Receiver<Command>,
    ) -> SubscriberResult<SessionEnd> {
        let client = Client::open(self.config.redis_url.as_str())?;
        let mut pubsub = client.get_async_pubsub().await?;

        let existing: Vec<PubSubChannel> = self.subscribed.read().await.iter().cloned().collect();
        for channel in &existing {
            pubsub.subscribe(channel.name()).await?;
        }
        tracing::info!(channels = existing.len(), "Subscriber connected to Redis");

        let mut stream = pubsub.on_message();
        loop {
            tokio::select! {
                msg = stream.next() => {
                    let Some(msg) = msg else {
                        return Ok(SessionEnd::Disconnected);
                    };
                    let payload: String = msg.get_payload().unwrap_or_default();
                    let received = ReceivedMessage::from_redis(msg.get_channel_name(), payload);
                    tracing::trace!(channel = %received.channel, "Received Pub/Sub message");
                    // No receivers is not an error
                    let _ = self.broadcast_tx.send(received);
                }
                cmd = control_rx.recv() => {
                    let Some(cmd) = cmd else {
                        return Ok(SessionEnd::Shutdown);
                    };
                    self.record(&cmd).await;
                    match cmd {
                        Command::Subscribe(channels) => {
                            drop(stream);
                            for channel in &channels {
                                // The connection is likely gone; reconnecting
                                // subscribes the whole recorded set again
                                pubsub.subscribe(channel.name()).await.inspect_err(|e| {
                                    tracing::error!(channel = %channel, error = %e, "Failed to subscribe");
                                })?;
                                tracing::debug!(channel = %channel, "Subscribed");
                            }
                            stream = pubsub.on_message();
                        }
                        Command::Unsubscribe(channels) => {
                            drop(stream);
                            for channel in &channels {
                                if let Err(e) = pubsub.unsubscribe(channel.name()).await {
                                    tracing::error!(channel = %channel, error = %e, "Failed to unsubscribe");
                                } else {
                                    tracing::debug!(channel = %channel, "Unsubscribed");
                                }
                            }
                            stream = pubsub.on_message();
                        }
                        Command::Shutdown => return Ok(SessionEnd::Shutdown),
                    }
                }
            }
        }
    }
}

/// Builder for [`Subscriber`]
#[derive(Debug, Default)]
pub struct SubscriberBuilder {
    config: SubscriberConfig,
    initial_channels: Vec<PubSubChannel>,
}

impl SubscriberBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn redis_url(mut self, url: impl Into<String>) -> Self {
        self.config.redis_url = url.into();
        self
    }

    #[must_use]
    pub fn broadcast_buffer(mut self, size: usize) -> Self {
        self.config.broadcast_buffer = size;
        self
    }

    #[must_use]
    pub fn reconnect_delay_ms(mut self, delay: u64) -> Self {
        self.config.reconnect_delay_ms = delay;
        self
    }

    /// Channel to subscribe as soon as the task starts
    #[must_use]
    pub fn subscribe(mut self, channel: PubSubChannel) -> Self {
        self.initial_channels.push(channel);
        self
    }

    /// Start the subscriber
    pub async fn build(self) -> SubscriberResult<Subscriber> {
        let subscriber = Subscriber::start(self.config);
        if !self.initial_channels.is_empty() {
            subscriber.subscribe(&self.initial_channels).await?;
        }
        Ok(subscriber)
    }
}
