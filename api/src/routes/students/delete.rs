use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{
    course::Model as CourseModel,
    user::{Model as UserModel, Role},
};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::db_error;
use crate::services::qr;

/// DELETE /api/students/{student_id}
///
/// Removes a student together with their enrollments and attendance. Courses
/// still owned by the account (a teacher later demoted to student) go too,
/// with their QR codes stopped.
pub async fn delete_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match UserModel::find_by_id(db, student_id).await {
        Ok(Some(user)) if user.role == Role::Student => {}
        Ok(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Student not found")),
            );
        }
        Err(e) => return db_error(e),
    }

    let taught = match CourseModel::ids_taught_by(db, student_id).await {
        Ok(ids) => ids,
        Err(e) => return db_error(e),
    };

    match UserModel::delete(db, student_id).await {
        Ok(_) => {
            qr::stop_many(app_state.qr(), app_state.ws(), &taught).await;
            (
                StatusCode::OK,
                Json(ApiResponse::success((), "Student deleted successfully")),
            )
        }
        Err(e) => db_error(e),
    }
}
