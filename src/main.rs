use actix_web::{middleware, web, App, HttpServer};
use notification_relay::{
    handlers::{
        notifications::{not_found, register_routes as register_notifications},
        websocket::register_routes as register_websocket,
    },
    metrics, Config, RelayService,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting notification relay");

    let config = Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let relay_service = Arc::new(RelayService::new());
    tracing::info!("Relay hub initialized");

    // Liveness sweep: reclaims registry entries whose transport is gone.
    let sweep_service = relay_service.clone();
    let sweep_interval = Duration::from_secs(config.relay.sweep_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            sweep_service.sweep_connections().await;
        }
    });

    // Keepalive probe: its own timer, never merged with the sweep.
    let ping_service = relay_service.clone();
    let ping_interval = Duration::from_secs(config.relay.ping_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ping_interval);
        loop {
            interval.tick().await;
            ping_service.ping_connections().await;
        }
    });

    let addr = format!("0.0.0.0:{}", config.app.port);
    tracing::info!("Starting HTTP server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(relay_service.clone()))
            .wrap(middleware::Logger::default())
            .wrap(metrics::MetricsMiddleware)
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .configure(|cfg| {
                register_notifications(cfg);
                register_websocket(cfg);
            })
            .default_service(web::route().to(not_found))
    })
    .bind(&addr)?
    .run()
    .await
}
