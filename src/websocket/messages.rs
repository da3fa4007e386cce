/// Frames pushed from the registry to individual WebSocket sessions
///
/// The relay protocol is opaque text: notifications travel verbatim as text
/// frames, so the only other frame the registry ever emits is the
/// transport-level keepalive probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMessage {
    /// A notification payload, delivered as-is in a text frame.
    Text(String),
    /// Transport-level keepalive probe (WebSocket ping frame).
    Ping,
}

impl RelayMessage {
    pub fn text(payload: impl Into<String>) -> Self {
        RelayMessage::Text(payload.into())
    }

    pub fn ping() -> Self {
        RelayMessage::Ping
    }
}
