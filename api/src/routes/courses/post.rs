use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::course::Model as CourseModel;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use super::common::is_teacher;
use crate::response::ApiResponse;
use crate::routes::common::{CourseResponse, bad_request, conflict_or_db_error, db_error};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Course name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Course code is required"))]
    pub code: String,

    #[validate(required(message = "teacher_id is required"))]
    pub teacher_id: Option<i64>,
}

/// POST /api/courses
///
/// - `201 Created` the course with its teacher
/// - `400 Bad Request` missing field or `teacher_id` is not a teacher
/// - `409 Conflict` duplicate code
pub async fn create_course(
    State(app_state): State<AppState>,
    Json(req): Json<CreateCourseRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return bad_request::<CourseResponse>(format_validation_errors(&e));
    }
    let Some(teacher_id) = req.teacher_id else {
        return bad_request("teacher_id is required");
    };

    match is_teacher(db, teacher_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("teacher_id must reference a teacher"),
        Err(e) => return db_error(e),
    }

    match CourseModel::code_taken(db, &req.code, None).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::error("A course with this code already exists")),
            );
        }
        Ok(false) => {}
        Err(e) => return db_error(e),
    }

    let course = match CourseModel::create(db, &req.name, &req.code, teacher_id).await {
        Ok(c) => c,
        Err(e) => return conflict_or_db_error(e, "A course with this code already exists"),
    };

    let teacher = db::models::user::Model::find_by_id(db, teacher_id)
        .await
        .ok()
        .flatten();

    tracing::info!(course_id = course.id, code = %course.code, "course created");
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            CourseResponse::new(course, teacher),
            "Course created successfully",
        )),
    )
}
