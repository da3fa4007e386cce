/// Integration tests for the notification-relay HTTP API
///
/// This test module covers:
/// - Notification submission (success, validation failure, filtered outcome)
/// - Status and health endpoints
/// - Unmatched-route handling and response formats
use actix_web::{test, web, App};
use notification_relay::handlers::notifications::{not_found, register_routes};
use notification_relay::RelayService;
use serde_json::{json, Value};
use std::sync::Arc;

macro_rules! relay_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($service))
                .configure(register_routes)
                .default_service(web::route().to(not_found)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_send_notification_success() {
    let service = Arc::new(RelayService::new());
    let app = relay_app!(service.clone());

    let req = test::TestRequest::post()
        .uri("/send-notification")
        .set_json(json!({
            "type": "new_wallpaper",
            "title": "Art1",
            "message": "New wallpaper available"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["clients"], json!(0));
    assert_eq!(
        body["notification"],
        json!("new_wallpaper|Art1|New wallpaper available|")
    );

    assert_eq!(service.status().await.total_messages, 1);
}

#[actix_web::test]
async fn test_send_notification_missing_field_is_400() {
    let service = Arc::new(RelayService::new());
    let app = relay_app!(service.clone());

    let req = test::TestRequest::post()
        .uri("/send-notification")
        .set_json(json!({
            "type": "new_wallpaper",
            "message": "no title here"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Missing required fields"));

    assert_eq!(service.status().await.total_messages, 0);
}

#[actix_web::test]
async fn test_send_notification_empty_field_is_400() {
    let service = Arc::new(RelayService::new());
    let app = relay_app!(service);

    let req = test::TestRequest::post()
        .uri("/send-notification")
        .set_json(json!({
            "type": "new_wallpaper",
            "title": "",
            "message": "empty title"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_send_notification_control_payload_is_filtered() {
    let service = Arc::new(RelayService::new());
    let app = relay_app!(service.clone());

    let req = test::TestRequest::post()
        .uri("/send-notification")
        .set_json(json!({
            "type": "new_wallpaper",
            "title": "Test",
            "message": "Connection successful!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));

    // Filtered submissions leave no trace in history
    assert_eq!(service.status().await.total_messages, 0);
}

#[actix_web::test]
async fn test_status_endpoint() {
    let service = Arc::new(RelayService::new());
    let app = relay_app!(service);

    let req = test::TestRequest::get().uri("/status").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!("online"));
    assert_eq!(body["clients"], json!(0));
    assert_eq!(body["totalMessages"], json!(0));
    assert_eq!(body["realNotifications"], json!(0));
    assert!(body["timestamp"].is_string());
    assert!(body["uptime"].is_number());
}

#[actix_web::test]
async fn test_status_reflects_submissions() {
    let service = Arc::new(RelayService::new());
    let app = relay_app!(service);

    for i in 0..3 {
        let req = test::TestRequest::post()
            .uri("/send-notification")
            .set_json(json!({
                "type": "new_wallpaper",
                "title": format!("Art{}", i),
                "message": "New wallpaper available"
            }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/status").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["totalMessages"], json!(3));
    assert_eq!(body["realNotifications"], json!(3));
}

#[actix_web::test]
async fn test_health_endpoint() {
    let service = Arc::new(RelayService::new());
    let app = relay_app!(service);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], json!("healthy"));
}

#[actix_web::test]
async fn test_unknown_route_returns_404_body() {
    let service = Arc::new(RelayService::new());
    let app = relay_app!(service);

    let req = test::TestRequest::get().uri("/does-not-exist").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Endpoint not found"));
}
