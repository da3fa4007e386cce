/// HTTP producer and status handlers
///
/// The HTTP layer is a thin adapter: validation, classification, storage and
/// fan-out all live in the relay hub.
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde_json::json;
use std::sync::Arc;

use crate::models::{
    HealthResponse, SendNotificationRequest, SendNotificationResponse, StatusResponse,
};
use crate::relay::{RelayService, SubmitOutcome};

/// Submit a notification for broadcast to every connected subscriber
///
/// Endpoint: POST /send-notification
pub async fn send_notification(
    service: web::Data<Arc<RelayService>>,
    req: web::Json<SendNotificationRequest>,
) -> ActixResult<HttpResponse> {
    let outcome = service.submit(&req).await?;

    let response = match outcome {
        SubmitOutcome::Sent {
            clients,
            notification,
        } => SendNotificationResponse::sent(clients, notification),
        SubmitOutcome::Filtered => SendNotificationResponse::filtered(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Relay status snapshot
///
/// Endpoint: GET /status
pub async fn get_status(service: web::Data<Arc<RelayService>>) -> ActixResult<HttpResponse> {
    let status = service.status().await;

    Ok(HttpResponse::Ok().json(StatusResponse {
        status: "online".to_string(),
        clients: status.clients,
        uptime: status.uptime_secs,
        total_messages: status.total_messages,
        real_notifications: status.real_notifications,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Liveness probe
///
/// Endpoint: GET /health
pub async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse::healthy()))
}

/// Fallback for unmatched routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Endpoint not found" }))
}

/// Register producer and status routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/send-notification", web::post().to(send_notification))
        .route("/status", web::get().to(get_status))
        .route("/health", web::get().to(health));
}
