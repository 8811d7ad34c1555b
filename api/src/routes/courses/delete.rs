use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::course::Model as CourseModel;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::db_error;
use crate::services::qr;

/// DELETE /api/courses/{course_id}
///
/// Deletes the course with its roster and attendance, and stops its QR.
pub async fn delete_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    match CourseModel::delete(app_state.db(), course_id).await {
        Ok(true) => {
            qr::stop(app_state.qr(), app_state.ws(), course_id).await;
            tracing::info!(course_id, "course deleted");
            (
                StatusCode::OK,
                Json(ApiResponse::success((), "Course deleted successfully")),
            )
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Course not found")),
        ),
        Err(e) => db_error(e),
    }
}
