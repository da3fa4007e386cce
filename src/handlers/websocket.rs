/// WebSocket handler for subscriber connections
///
/// Handles WebSocket upgrade for `GET /ws`. Frames are opaque text: any
/// payload that survives classification is relayed verbatim to every other
/// subscriber.
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use std::sync::Arc;

use crate::relay::RelayService;
use crate::websocket::RelaySession;

/// WebSocket upgrade for a new subscriber
///
/// Endpoint: GET /ws
pub async fn relay_ws(
    req: HttpRequest,
    payload: web::Payload,
    service: web::Data<Arc<RelayService>>,
) -> actix_web::Result<HttpResponse> {
    tracing::info!("WebSocket subscriber connecting from {:?}", req.peer_addr());

    ws::start(RelaySession::new(service.get_ref().clone()), &req, payload)
}

/// Register WebSocket routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(relay_ws));
}
