/// Relay hub
///
/// Single owner of the relay's shared state (history buffer + connection
/// registry). Every mutation flows through here: connection lifecycle,
/// inbound WebSocket traffic, HTTP submissions and the periodic maintenance
/// jobs all observe the same locking discipline.
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::SendNotificationRequest;
use crate::relay::classifier::is_real_notification;
use crate::relay::history::HistoryBuffer;
use crate::websocket::{ConnectionManager, RelayMessage, RelaySender};

/// How many recent notifications a newly joined subscriber is backfilled with.
pub const BACKFILL_COUNT: usize = 5;

/// Inbound marker for a client's initial-data request.
///
/// Checked before classification; the classifier denies the same marker, but
/// both paths are load-bearing and kept.
const INITIAL_DATA_MARKER: &str = "request_initial_data";

/// Outcome of a side-channel submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored and broadcast to every connection.
    Sent { clients: usize, notification: String },
    /// Classified as system/control traffic; not stored, not broadcast.
    Filtered,
}

/// Point-in-time relay counters for status reporting.
#[derive(Debug, Clone)]
pub struct RelayStatus {
    pub clients: usize,
    pub uptime_secs: u64,
    pub total_messages: usize,
    /// Real entries within history. Always equals `total_messages` when the
    /// record path holds its contract; reported separately regardless.
    pub real_notifications: usize,
}

/// Orchestrates classification, history and fan-out.
pub struct RelayService {
    connections: ConnectionManager,
    history: RwLock<HistoryBuffer>,
    started_at: Instant,
}

impl RelayService {
    pub fn new() -> Self {
        Self {
            connections: ConnectionManager::new(),
            history: RwLock::new(HistoryBuffer::new()),
            started_at: Instant::now(),
        }
    }

    /// Register a new subscriber connection and backfill it.
    ///
    /// Backfill replays the most recent real notifications to this connection
    /// only; other subscribers see nothing.
    pub async fn register_connection(&self, connection_id: Uuid, sender: RelaySender) {
        self.connections.register(connection_id, sender).await;

        let recent = {
            let history = self.history.read().await;
            history.recent_real(BACKFILL_COUNT)
        };

        for entry in recent {
            if !self
                .connections
                .send_to(connection_id, RelayMessage::text(entry))
                .await
            {
                break;
            }
        }
    }

    /// Deregister a connection. Idempotent.
    pub async fn unregister_connection(&self, connection_id: Uuid) {
        self.connections.unregister(connection_id).await;
    }

    /// Handle a text payload received from an open connection.
    pub async fn handle_inbound(&self, sender_id: Uuid, text: &str) {
        // Initial-data requests are a silent no-op. The classifier would drop
        // this marker too; the explicit check runs first.
        if text.contains(INITIAL_DATA_MARKER) {
            debug!("Initial data request from connection {}", sender_id);
            return;
        }

        if !is_real_notification(text) {
            debug!(
                "Dropping system message from connection {}: {} bytes",
                sender_id,
                text.len()
            );
            return;
        }

        {
            let mut history = self.history.write().await;
            history.record_if_new(text);
        }

        self.connections.broadcast_except(sender_id, text).await;
        metrics::observe_broadcast("connection");
        debug!("Relayed notification from connection {}", sender_id);
    }

    /// Handle a submission from the HTTP producer API.
    pub async fn submit(&self, req: &SendNotificationRequest) -> Result<SubmitOutcome> {
        let notification_type = req.notification_type.as_deref().unwrap_or("");
        let title = req.title.as_deref().unwrap_or("");
        let message = req.message.as_deref().unwrap_or("");
        let extra_data = req.extra_data.as_deref().unwrap_or("");

        if notification_type.is_empty() || title.is_empty() || message.is_empty() {
            return Err(AppError::Validation(
                "Missing required fields: type, title, message".to_string(),
            ));
        }

        let text = format!("{}|{}|{}|{}", notification_type, title, message, extra_data);

        if !is_real_notification(&text) {
            info!("Submission filtered as system message");
            return Ok(SubmitOutcome::Filtered);
        }

        {
            let mut history = self.history.write().await;
            history.record_if_new(&text);
        }

        self.connections.broadcast_all(&text).await;
        metrics::observe_broadcast("api");

        let clients = self.connections.len().await;
        info!("Notification broadcast to {} client(s)", clients);

        Ok(SubmitOutcome::Sent {
            clients,
            notification: text,
        })
    }

    /// Current relay counters.
    pub async fn status(&self) -> RelayStatus {
        let clients = self.connections.len().await;
        let (total_messages, real_notifications) = {
            let history = self.history.read().await;
            (history.len(), history.all_real().len())
        };

        RelayStatus {
            clients,
            uptime_secs: self.started_at.elapsed().as_secs(),
            total_messages,
            real_notifications,
        }
    }

    /// Periodic liveness sweep over the registry.
    pub async fn sweep_connections(&self) {
        self.connections.sweep().await;
    }

    /// Periodic keepalive probe over the registry.
    pub async fn ping_connections(&self) {
        self.connections.ping_all().await;
    }
}

impl Default for RelayService {
    fn default() -> Self {
        Self::new()
    }
}
