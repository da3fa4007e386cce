/// WebSocket Connection Manager
///
/// Tracks every live subscriber connection and routes relay traffic to them.
/// Supports:
/// - Connection registration/deregistration
/// - Fan-out to all connections, optionally excluding the sender
/// - Keepalive (ping) probing
/// - Liveness sweep of silently dropped connections

use super::RelayMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Type alias for the per-connection message sender
pub type RelaySender = mpsc::UnboundedSender<RelayMessage>;

/// Manages active WebSocket connections
///
/// Thread-safe registry using Arc<RwLock<>> for shared state. A connection is
/// considered open while its channel is open; a failed send means the peer is
/// gone and the connection is removed. Removal is deferred until after the
/// fan-out iteration so one dead connection never stalls delivery to the
/// rest.
#[derive(Clone)]
pub struct ConnectionManager {
    connections: Arc<RwLock<HashMap<Uuid, RelaySender>>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a newly accepted connection. Idempotent per connection id.
    pub async fn register(&self, connection_id: Uuid, sender: RelaySender) {
        let mut connections = self.connections.write().await;
        connections.insert(connection_id, sender);
        tracing::debug!(
            "Registered connection {} ({} active)",
            connection_id,
            connections.len()
        );
    }

    /// Deregister a connection. Idempotent if already removed.
    pub async fn unregister(&self, connection_id: Uuid) {
        let mut connections = self.connections.write().await;
        if connections.remove(&connection_id).is_some() {
            tracing::debug!(
                "Removed connection {} ({} active)",
                connection_id,
                connections.len()
            );
        }
    }

    /// Send `text` to every open connection.
    pub async fn broadcast_all(&self, text: &str) {
        self.fan_out(text, None).await;
    }

    /// Send `text` to every open connection except `sender_id`.
    pub async fn broadcast_except(&self, sender_id: Uuid, text: &str) {
        self.fan_out(text, Some(sender_id)).await;
    }

    async fn fan_out(&self, text: &str, skip: Option<Uuid>) {
        let mut failed = Vec::new();
        {
            let connections = self.connections.read().await;
            for (id, sender) in connections.iter() {
                if Some(*id) == skip {
                    continue;
                }
                if sender.send(RelayMessage::text(text)).is_err() {
                    failed.push(*id);
                }
            }
        }

        for id in failed {
            tracing::warn!("Send failed for connection {}, removing", id);
            self.unregister(id).await;
        }
    }

    /// Deliver a message to a single connection; used for history backfill.
    ///
    /// Returns false if the connection is closed (and removes it).
    pub async fn send_to(&self, connection_id: Uuid, message: RelayMessage) -> bool {
        let delivered = {
            let connections = self.connections.read().await;
            match connections.get(&connection_id) {
                Some(sender) => sender.send(message).is_ok(),
                None => return false,
            }
        };

        if !delivered {
            tracing::warn!("Send failed for connection {}, removing", connection_id);
            self.unregister(connection_id).await;
        }
        delivered
    }

    /// Send a keepalive probe to every open connection.
    ///
    /// A failed probe removes that connection, nothing else.
    pub async fn ping_all(&self) {
        let mut failed = Vec::new();
        {
            let connections = self.connections.read().await;
            for (id, sender) in connections.iter() {
                if sender.send(RelayMessage::ping()).is_err() {
                    failed.push(*id);
                }
            }
        }

        for id in failed {
            tracing::warn!("Keepalive probe failed for connection {}, removing", id);
            self.unregister(id).await;
        }
    }

    /// Remove every connection whose channel is no longer open.
    ///
    /// Reclaims entries for connections the transport dropped without the
    /// session deregistering itself.
    pub async fn sweep(&self) {
        let mut connections = self.connections.write().await;
        let before = connections.len();
        connections.retain(|_, sender| !sender.is_closed());
        let removed = before - connections.len();
        if removed > 0 {
            tracing::info!(
                "Liveness sweep removed {} dead connection(s) ({} active)",
                removed,
                connections.len()
            );
        }
    }

    /// Current number of registered connections.
    pub async fn len(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
