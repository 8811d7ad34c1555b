use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::{sync::mpsc, time};

use super::WebSocketManager;
use super::handler_trait::WsHandler;
use super::runtime::WsContext;

pub struct WsServerOptions {
    /// Interval of protocol-level pings.
    pub ws_ping_sec: u64,
    /// Answer `{"type":"ping"}` text frames with an app-level pong.
    pub enable_app_ping: bool,
}

impl Default for WsServerOptions {
    fn default() -> Self {
        Self {
            ws_ping_sec: 30,
            enable_app_ping: true,
        }
    }
}

/// Serves one socket subscribed to `topic` until either side goes away.
pub async fn serve_topic<H: WsHandler>(
    socket: WebSocket,
    manager: WebSocketManager,
    topic: String,
    user_id: Option<i64>,
    handler: Arc<H>,
    opts: WsServerOptions,
) {
    let mut rx = manager.subscribe(&topic).await;
    if let Some(uid) = user_id {
        manager.register(&topic, uid).await;
    }

    let (mut sink, mut socket_rx) = socket.split();

    // Single writer; every producer goes through `out_tx`.
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(64);
    let writer_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    let ctx = WsContext::new(topic.clone(), user_id, manager.clone(), out_tx.clone());

    // S→C: forward room broadcasts
    let forward_task = {
        let out_tx = out_tx.clone();
        let topic = topic.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(msg) => {
                        if out_tx.send(Message::Text(msg.into())).await.is_err() {
                            tracing::info!("Client disconnected while sending to '{topic}'");
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        tracing::warn!("Socket on '{topic}' lagged, skipped {n} messages");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    };

    let ping_task = {
        let out_tx = out_tx.clone();
        let every = std::time::Duration::from_secs(opts.ws_ping_sec.max(1));
        tokio::spawn(async move {
            loop {
                time::sleep(every).await;
                if out_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
        })
    };

    handler.on_open(&ctx).await;

    // C→S: parse & dispatch until close
    while let Some(Ok(msg)) = socket_rx.next().await {
        match msg {
            Message::Text(text) => {
                let raw = text.as_str();
                if opts.enable_app_ping && is_app_ping(raw) {
                    let _ = ctx
                        .reply_text(
                            serde_json::json!({
                                "type": "pong",
                                "topic": ctx.topic,
                                "ts": Utc::now().to_rfc3339(),
                            })
                            .to_string(),
                        )
                        .await;
                    continue;
                }
                match serde_json::from_str::<H::In>(raw) {
                    Ok(parsed) => handler.on_message(&ctx, parsed).await,
                    Err(e) => tracing::warn!("WS invalid message on '{}': {e}", ctx.topic),
                }
            }
            Message::Ping(payload) => {
                let _ = ctx.reply_pong(payload).await;
            }
            Message::Pong(_) => {}
            Message::Binary(_) => {
                tracing::warn!("Ignoring binary on topic '{}'", ctx.topic);
            }
            Message::Close(_) => break,
        }
    }

    handler.on_close(&ctx).await;

    forward_task.abort();
    ping_task.abort();
    drop(ctx);
    drop(out_tx);
    let _ = writer_task.await;

    if let Some(uid) = user_id {
        manager.unregister(&topic, uid).await;
    }
    tracing::info!("WS session ended for topic '{topic}'");
}

fn is_app_ping(raw: &str) -> bool {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
        if let Some(Value::String(t)) = map.get("type") {
            return t == "ping";
        }
    }
    false
}
