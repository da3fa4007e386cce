pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod relay;
pub mod websocket;

pub use config::Config;
pub use error::{AppError, Result};
pub use relay::{is_real_notification, HistoryBuffer, RelayService};
pub use websocket::{ConnectionManager, RelayMessage, RelaySession};
