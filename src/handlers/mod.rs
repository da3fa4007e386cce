/// HTTP handlers for the relay API
pub mod notifications;
pub mod websocket;

pub use notifications::*;
pub use websocket::register_routes as register_websocket;
