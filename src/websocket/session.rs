//! Per-connection WebSocket session actor
//!
//! Bridges one subscriber socket to the relay hub: registers itself on start,
//! writes registry frames out to the socket, feeds inbound text into the hub
//! and deregisters on stop. A session whose peer goes silent past the client
//! timeout is stopped so the registry can reclaim it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::{Actor, ActorContext, AsyncContext, StreamHandler};
use actix_web_actors::ws;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use uuid::Uuid;

use super::RelayMessage;
use crate::relay::RelayService;

const LIVENESS_CHECK_INTERVAL: Duration = Duration::from_secs(5);
/// Keepalive probes go out every 30s; a peer gets two misses before closing.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(90);

pub struct RelaySession {
    id: Uuid,
    service: Arc<RelayService>,
    last_seen: Instant,
}

impl RelaySession {
    pub fn new(service: Arc<RelayService>) -> Self {
        Self {
            id: Uuid::new_v4(),
            service,
            last_seen: Instant::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    fn watch_liveness(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(LIVENESS_CHECK_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.last_seen) > CLIENT_TIMEOUT {
                tracing::warn!("Connection {} timed out, closing", act.id);
                ctx.stop();
            }
        });
    }
}

impl Actor for RelaySession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::debug!("Subscriber connection {} opened", self.id);
        self.watch_liveness(ctx);

        // Registry traffic flows through this channel; when the registry
        // drops the sender the stream finishes and the actor stops.
        let (tx, rx) = mpsc::unbounded_channel();
        ctx.add_stream(UnboundedReceiverStream::new(rx));

        let service = self.service.clone();
        let id = self.id;
        actix_rt::spawn(async move {
            service.register_connection(id, tx).await;
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::debug!("Subscriber connection {} closed", self.id);

        let service = self.service.clone();
        let id = self.id;
        actix_rt::spawn(async move {
            service.unregister_connection(id).await;
        });
    }
}

/// Frames pushed by the registry: broadcasts, backfill and keepalive probes.
impl StreamHandler<RelayMessage> for RelaySession {
    fn handle(&mut self, msg: RelayMessage, ctx: &mut Self::Context) {
        match msg {
            RelayMessage::Text(text) => ctx.text(text),
            RelayMessage::Ping => ctx.ping(b""),
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for RelaySession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                self.last_seen = Instant::now();

                let service = self.service.clone();
                let id = self.id;
                let text = text.to_string();
                actix_rt::spawn(async move {
                    service.handle_inbound(id, &text).await;
                });
            }
            Ok(ws::Message::Ping(payload)) => {
                self.last_seen = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_seen = Instant::now();
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Binary(_)) => {
                tracing::warn!("Binary frame on connection {} (unsupported)", self.id);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) => {
                tracing::warn!("Continuation frame on connection {} (closing)", self.id);
                ctx.stop();
            }
            Ok(ws::Message::Nop) => {}
            Err(e) => {
                tracing::error!("WebSocket protocol error on connection {}: {}", self.id, e);
                ctx.stop();
            }
        }
    }
}
