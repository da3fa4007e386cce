/// WebSocket subscriber plumbing
///
/// This module handles the persistent subscriber connections.
///
/// Architecture:
/// 1. ConnectionManager: registry of active connections with fan-out
/// 2. RelaySession: per-connection actor bridging registry and socket
/// 3. Liveness: keepalive probes plus a periodic sweep of dead entries

pub mod manager;
pub mod messages;
pub mod session;

pub use manager::{ConnectionManager, RelaySender};
pub use messages::RelayMessage;
pub use session::RelaySession;
