use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::attendance::{Model as AttendanceModel, Status};
use serde::Deserialize;
use util::state::AppState;

use super::common::AttendanceResponse;
use crate::auth::{AuthUser, guards::ensure_course_staff};
use crate::response::ApiResponse;
use crate::routes::common::{bad_request, db_error, forward_guard};
use crate::ws::attendance::{emit, payload};

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// PUT /api/attendance/{attendance_id}
///
/// Overrides the status of a record (`present`, `late` or `absent`).
/// Broadcasts `attendance.updated`.
pub async fn update_status(
    State(app_state): State<AppState>,
    Path(attendance_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let Ok(status) = req.status.trim().parse::<Status>() else {
        return bad_request::<AttendanceResponse>("status must be present, late or absent");
    };

    let record = match AttendanceModel::find_by_id(db, attendance_id).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Attendance record not found")),
            );
        }
        Err(e) => return db_error(e),
    };

    if let Err(e) = ensure_course_staff(db, &user, record.course_id).await {
        return forward_guard(e);
    }

    let updated = match AttendanceModel::set_status(db, attendance_id, status).await {
        Ok(r) => r,
        Err(e) => return db_error(e),
    };

    emit::attendance_updated(
        app_state.ws(),
        payload::AttendanceUpdated {
            id: updated.id,
            course_id: updated.course_id,
            student_id: updated.student_id,
            date: updated.date,
            status: updated.status,
        },
    )
    .await;

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            AttendanceResponse::from(updated),
            "Attendance updated successfully",
        )),
    )
}
