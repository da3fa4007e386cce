/// Message classification for the relay
///
/// Decides whether an inbound payload is a real notification or internal
/// control traffic (handshakes, keepalives, debug probes). Only real
/// notifications are stored and fanned out.

/// Control markers that identify system/control traffic.
///
/// Matching is case-insensitive substring matching, anywhere in the payload.
/// The list is intentionally naive string matching rather than structured
/// message typing; changing the semantics here changes what gets relayed.
const CONTROL_MARKERS: &[&str] = &[
    "initial sync",
    "connected to",
    "connection successful",
    "request_initial_data",
    "ping",
    "pong",
    "heartbeat",
    "system_",
    "debug_",
    "test_connection",
];

/// Returns true if `text` is a real notification.
///
/// A message is real iff none of the control markers appear as a
/// case-insensitive substring. An empty string carries no marker and is real.
pub fn is_real_notification(text: &str) -> bool {
    let lowered = text.to_lowercase();
    !CONTROL_MARKERS.iter().any(|marker| lowered.contains(marker))
}
