// util/src/ws/axum_adapter.rs
use super::WebSocketManager;
use super::handler_trait::WsHandler;
use super::serve::{WsServerOptions, serve_topic};
use axum::{
    extract::{WebSocketUpgrade, ws::WebSocket},
    response::IntoResponse,
};
use std::sync::Arc;

/// Upgrades the connection and serves `topic` with `handler` until it closes.
pub fn ws_route<H: WsHandler>(
    ws: WebSocketUpgrade,
    manager: WebSocketManager,
    topic: String,
    user_id: Option<i64>,
    handler: Arc<H>,
    opts: WsServerOptions,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket: WebSocket| async move {
        serve_topic(socket, manager, topic, user_id, handler, opts).await;
    })
}
