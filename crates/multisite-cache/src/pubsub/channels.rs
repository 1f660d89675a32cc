//! Pub/Sub channel naming.
//!
//! Each site domain gets its own channel so a gateway only receives
//! notifications for domains it currently has viewers on.

use std::fmt;

/// Prefix of per-site channels (`site:{domain}`)
pub const SITE_CHANNEL_PREFIX: &str = "site:";

/// Pub/Sub channel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Change notifications for one site domain
    Site(String),
    /// Any other channel name
    Custom(String),
}

impl PubSubChannel {
    /// Channel for a site domain; domains are matched case-insensitively
    #[must_use]
    pub fn site(domain: &str) -> Self {
        Self::Site(domain.trim().to_ascii_lowercase())
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Site(domain) => format!("{SITE_CHANNEL_PREFIX}{domain}"),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a Redis channel name
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.strip_prefix(SITE_CHANNEL_PREFIX) {
            Some(domain) if !domain.is_empty() => Self::site(domain),
            _ => Self::Custom(name.to_string()),
        }
    }

    /// Domain this channel carries, if it is a site channel
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        match self {
            Self::Site(domain) => Some(domain),
            Self::Custom(_) => None,
        }
    }
}

impl fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
