//! Tracking of live push-channel subscriber connections.
//!
//! Delivery itself rides each subscriber's hub [`Subscription`]
//! (`crate::storage::Subscription`); the registry only assigns identifiers
//! and answers "how many subscribers are connected" for health reporting
//! and logs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use dashmap::DashMap;

/// Unique identifier for a subscriber connection, assigned by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u64);

/// Bookkeeping for one live subscriber connection.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// When this connection was established.
    pub connected_at: Instant,
}

/// Thread-safe registry of live subscriber connections.
#[derive(Debug)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ConnectionInfo>,
    next_id: AtomicU64,
}

impl ConnectionRegistry {
    /// Creates a new empty registry.
    ///
    /// Connection IDs start at 1 (0 is reserved as "no connection").
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Registers a new connection and returns its identifier.
    pub fn register(&self) -> ConnectionId {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.connections.insert(
            id,
            ConnectionInfo {
                connected_at: Instant::now(),
            },
        );
        id
    }

    /// Removes a connection, returning its bookkeeping entry if present.
    pub fn remove(&self, id: ConnectionId) -> Option<ConnectionInfo> {
        self.connections.remove(&id).map(|(_, info)| info)
    }

    /// Number of live connections.
    #[must_use]
    pub fn count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
