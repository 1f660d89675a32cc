//! Connection manager
//!
//! Tracks every open page by domain using DashMap for thread-safe access.
//! Registering a connection hands back a [`ConnectionGuard`]; dropping the
//! guard unregisters it. The first page of a domain and the last one to leave
//! are reported as [`DomainInterest`] so the dispatcher can subscribe to and
//! unsubscribe from that domain's channel.

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::mpsc;

use super::{Connection, Outbound};

/// Change in whether any page listens on a domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainInterest {
    /// First page for the domain connected
    Acquired(String),
    /// Last page for the domain left
    Released(String),
}

pub type InterestReceiver = mpsc::UnboundedReceiver<DomainInterest>;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by ID
    connections: DashMap<String, Arc<Connection>>,

    /// Domain to connection IDs mapping
    domain_connections: DashMap<String, HashSet<String>>,

    interest_tx: mpsc::UnboundedSender<DomainInterest>,
}

impl ConnectionManager {
    /// Create a shared connection manager and the receiving end of its
    /// interest events
    #[must_use]
    pub fn new_shared() -> (Arc<Self>, InterestReceiver) {
        let (interest_tx, interest_rx) = mpsc::unbounded_channel();
        let manager = Self {
            connections: DashMap::new(),
            domain_connections: DashMap::new(),
            interest_tx,
        };
        (Arc::new(manager), interest_rx)
    }

    /// Register a page listening on `domain`
    pub fn register(self: &Arc<Self>, domain: &str, sender: mpsc::Sender<Outbound>) -> ConnectionGuard {
        let domain = domain.to_ascii_lowercase();
        let connection = Connection::new(Connection::generate_id(), domain.clone(), sender);
        self.connections
            .insert(connection.id().to_string(), connection.clone());

        // The entry lock is held while reporting so interest events stay ordered
        let mut ids = self.domain_connections.entry(domain.clone()).or_default();
        ids.insert(connection.id().to_string());
        if ids.len() == 1 {
            self.report(DomainInterest::Acquired(domain.clone()));
        }
        drop(ids);

        tracing::debug!(
            connection_id = %connection.id(),
            domain = %domain,
            "Connection added"
        );

        ConnectionGuard {
            manager: Arc::clone(self),
            connection,
        }
    }

    fn unregister(&self, connection: &Connection) {
        self.connections.remove(connection.id());

        if let Entry::Occupied(mut ids) = self.domain_connections.entry(connection.domain().to_string()) {
            ids.get_mut().remove(connection.id());
            if ids.get().is_empty() {
                ids.remove();
                self.report(DomainInterest::Released(connection.domain().to_string()));
            }
        }

        tracing::debug!(
            connection_id = %connection.id(),
            domain = %connection.domain(),
            "Connection removed"
        );
    }

    fn report(&self, interest: DomainInterest) {
        if self.interest_tx.send(interest).is_err() {
            tracing::debug!("Interest receiver dropped, dispatcher is not running");
        }
    }

    /// Get all connections listening on a domain
    pub fn get_domain_connections(&self, domain: &str) -> Vec<Arc<Connection>> {
        self.domain_connections
            .get(&domain.to_ascii_lowercase())
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.connections.get(id).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Dispatch an event to every page of a domain.
    ///
    /// Returns how many connections accepted it.
    pub fn dispatch_to_domain(&self, domain: &str, event_type: &str, data: &Value) -> usize {
        let sent = self
            .get_domain_connections(domain)
            .iter()
            .filter(|conn| conn.dispatch(event_type, data.clone()))
            .count();

        tracing::trace!(
            domain = %domain,
            event_type = %event_type,
            sent = sent,
            "Event dispatched to domain connections"
        );

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of domains with at least one page connected
    pub fn domain_count(&self) -> usize {
        self.domain_connections.len()
    }

    /// Check if any page listens on a domain
    pub fn is_watched(&self, domain: &str) -> bool {
        self.domain_connections
            .contains_key(&domain.to_ascii_lowercase())
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("domains", &self.domain_connections.len())
            .finish()
    }
}

/// Registration of one connection; unregisters it on drop
pub struct ConnectionGuard {
    manager: Arc<ConnectionManager>,
    connection: Arc<Connection>,
}

impl ConnectionGuard {
    #[must_use]
    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }
}

impl Deref for ConnectionGuard {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.manager.unregister(&self.connection);
    }
}

impl std::fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ConnectionGuard").field(&self.connection).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> (mpsc::Sender<Outbound>, mpsc::Receiver<Outbound>) {
        mpsc::channel(10)
    }

    #[test]
    fn test_first_and_last_page_report_interest() {
        let (manager, mut interests) = ConnectionManager::new_shared();
        let (tx1, _rx1) = sender();
        let (tx2, _rx2) = sender();

        let first = manager.register("Site1.example.com", tx1);
        assert_eq!(
            interests.try_recv().unwrap(),
            DomainInterest::Acquired("site1.example.com".to_string())
        );

        let second = manager.register("site1.example.com", tx2);
        assert!(interests.try_recv().is_err());
        assert_eq!(manager.connection_count(), 2);
        assert_eq!(manager.domain_count(), 1);

        drop(first);
        assert!(interests.try_recv().is_err());
        assert!(manager.is_watched("site1.example.com"));

        drop(second);
        assert_eq!(
            interests.try_recv().unwrap(),
            DomainInterest::Released("site1.example.com".to_string())
        );
        assert_eq!(manager.connection_count(), 0);
        assert!(!manager.is_watched("site1.example.com"));
    }

    #[test]
    fn test_domains_are_independent() {
        let (manager, mut interests) = ConnectionManager::new_shared();
        let (tx1, _rx1) = sender();
        let (tx2, _rx2) = sender();

        let _one = manager.register("site1.example.com", tx1);
        let two = manager.register("site2.example.com", tx2);
        assert_eq!(manager.domain_count(), 2);

        drop(two);
        let events: Vec<_> = std::iter::from_fn(|| interests.try_recv().ok()).collect();
        assert_eq!(
            events,
            vec![
                DomainInterest::Acquired("site1.example.com".to_string()),
                DomainInterest::Acquired("site2.example.com".to_string()),
                DomainInterest::Released("site2.example.com".to_string()),
            ]
        );
        assert!(manager.is_watched("site1.example.com"));
    }

    #[test]
    fn test_dispatch_reaches_only_matching_domain() {
        let (manager, _interests) = ConnectionManager::new_shared();
        let (tx1, mut rx1) = sender();
        let (tx2, mut rx2) = sender();
        let (tx3, mut rx3) = sender();

        let _a = manager.register("site1.example.com", tx1);
        let _b = manager.register("site1.example.com", tx2);
        let _c = manager.register("site2.example.com", tx3);

        let data = serde_json::json!({"site_name": "Renamed"});
        let sent = manager.dispatch_to_domain("SITE1.example.com", "SITE_UPDATE", &data);

        assert_eq!(sent, 2);
        assert!(matches!(rx1.try_recv(), Ok(Outbound::Frame(m)) if m.s == Some(1)));
        assert!(matches!(rx2.try_recv(), Ok(Outbound::Frame(m)) if m.s == Some(1)));
        assert!(rx3.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_without_listeners() {
        let (manager, _interests) = ConnectionManager::new_shared();
        let sent = manager.dispatch_to_domain("site9.example.com", "SITE_UPDATE", &Value::Null);
        assert_eq!(sent, 0);
    }

    #[test]
    fn test_guard_derefs_to_connection() {
        let (manager, _interests) = ConnectionManager::new_shared();
        let (tx, _rx) = sender();
        let guard = manager.register("site3.example.com", tx);

        assert_eq!(guard.domain(), "site3.example.com");
        assert_eq!(manager.get_domain_connections("site3.example.com").len(), 1);
        assert_eq!(guard.connection().id(), guard.id());
    }
}
