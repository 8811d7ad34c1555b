use super::common::CourseRoomIncoming;
use chrono::Utc;
use serde_json::json;
use util::config;
use util::qr::{QrEntry, QrRegistry};
use util::ws::handler_trait::WsHandler;
use util::ws::runtime::WsContext;

/// Course room: pushes the running QR on connect and answers dashboard queries.
pub struct CourseRoomHandler {
    pub course_id: i64,
    pub qr: QrRegistry,
}

fn qr_frame(course_id: i64, entry: Option<&QrEntry>) -> serde_json::Value {
    json!({
        "type": "qr",
        "course_id": course_id,
        "running": entry.is_some(),
        "token": entry.map(|e| e.token.clone()),
        "expires_at": entry.map(|e| e.expires_at.to_rfc3339()),
        "started_at": entry.map(|e| e.started_at.to_rfc3339()),
        "rotation_seconds": config::qr_rotation_seconds(),
        "ts": Utc::now().to_rfc3339(),
    })
}

impl WsHandler for CourseRoomHandler {
    type In = CourseRoomIncoming;

    async fn on_open(&self, ctx: &WsContext) {
        let entry = self.qr.get(self.course_id).await;
        let _ = ctx.reply_json(&qr_frame(self.course_id, entry.as_ref())).await;
    }

    async fn on_message(&self, ctx: &WsContext, msg: Self::In) {
        match msg {
            CourseRoomIncoming::CurrentQr => {
                let entry = self.qr.get(self.course_id).await;
                let _ = ctx.reply_json(&qr_frame(self.course_id, entry.as_ref())).await;
            }
            CourseRoomIncoming::Viewers => {
                let count = ctx.ws.viewer_count(&ctx.topic).await;
                let _ = ctx
                    .reply_json(&json!({
                        "type": "viewers",
                        "topic": ctx.topic,
                        "count": count,
                        "ts": Utc::now().to_rfc3339(),
                    }))
                    .await;
            }
        }
    }
}
