use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::enrollment::Model as EnrollmentModel;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::db_error;

/// DELETE /api/enrollments/{course_id}/{student_id}
///
/// Unlinks a student from a course. Existing attendance is kept.
pub async fn unenroll_student(
    State(app_state): State<AppState>,
    Path((course_id, student_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    match EnrollmentModel::remove(app_state.db(), course_id, student_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::<()>::success((), "Student removed from course")),
        ),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Enrollment not found")),
        ),
        Err(e) => db_error(e),
    }
}
