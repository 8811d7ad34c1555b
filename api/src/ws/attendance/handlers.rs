use axum::{
    Extension,
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
};
use std::sync::Arc;
use util::state::AppState;
use util::ws::axum_adapter::ws_route;
use util::ws::serve::WsServerOptions;

use super::topics::course_attendance_topic;
use super::ws_handlers::CourseRoomHandler;
use crate::auth::AuthUser;

/// GET /ws/courses/{course_id}
///
/// Live attendance room of a course. Access is checked by `allow_course_staff`.
pub async fn course_room_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let handler = Arc::new(CourseRoomHandler {
        course_id,
        qr: app_state.qr_clone(),
    });

    ws_route(
        ws,
        app_state.ws_clone(),
        course_attendance_topic(course_id),
        Some(user.id()),
        handler,
        WsServerOptions::default(),
    )
}
