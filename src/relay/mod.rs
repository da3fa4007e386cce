/// Relay core
///
/// Architecture:
/// 1. classifier: decides real notification vs system/control traffic
/// 2. history: bounded deduplicated buffer of recent real notifications
/// 3. service: the hub orchestrating classify -> store -> fan-out

pub mod classifier;
pub mod history;
pub mod service;

pub use classifier::is_real_notification;
pub use history::{HistoryBuffer, HISTORY_CAPACITY};
pub use service::{RelayService, RelayStatus, SubmitOutcome, BACKFILL_COUNT};
