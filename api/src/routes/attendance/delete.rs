use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::attendance::Model as AttendanceModel;
use util::state::AppState;

use crate::auth::{AuthUser, guards::ensure_course_staff};
use crate::response::ApiResponse;
use crate::routes::common::{db_error, forward_guard};
use crate::services::qr;
use crate::ws::attendance::{emit, payload};

/// DELETE /api/attendance/qr/{course_id}
///
/// Stops the rotating QR. Broadcasts `qr.stopped`.
pub async fn stop_qr(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    match qr::stop(app_state.qr(), app_state.ws(), course_id).await {
        Some(_) => {
            tracing::info!(course_id, "QR stopped");
            (
                StatusCode::OK,
                Json(ApiResponse::<()>::success((), "QR stopped")),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("QR is not running for this course")),
        ),
    }
}

/// DELETE /api/attendance/{attendance_id}
///
/// Broadcasts `attendance.deleted`.
pub async fn delete_attendance(
    State(app_state): State<AppState>,
    Path(attendance_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    let db = app_state.db();

    let record = match AttendanceModel::find_by_id(db, attendance_id).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Attendance record not found")),
            );
        }
        Err(e) => return db_error(e),
    };

    if let Err(e) = ensure_course_staff(db, &user, record.course_id).await {
        return forward_guard(e);
    }

    match AttendanceModel::delete(db, attendance_id).await {
        Ok(Some(deleted)) => {
            emit::attendance_deleted(
                app_state.ws(),
                payload::AttendanceDeleted {
                    id: deleted.id,
                    course_id: deleted.course_id,
                    student_id: deleted.student_id,
                    date: deleted.date,
                },
            )
            .await;
            (
                StatusCode::OK,
                Json(ApiResponse::success((), "Attendance deleted successfully")),
            )
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Attendance record not found")),
        ),
        Err(e) => db_error(e),
    }
}
