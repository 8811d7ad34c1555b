use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::{
    course::{CourseChanges, Model as CourseModel},
    user::Model as UserModel,
};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use super::common::is_teacher;
use crate::response::ApiResponse;
use crate::routes::common::{CourseResponse, bad_request, conflict_or_db_error, db_error};

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "Course name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Course code cannot be empty"))]
    pub code: Option<String>,

    pub teacher_id: Option<i64>,
}

/// PUT /api/courses/{course_id}
///
/// Partial update of name, code and teacher.
pub async fn update_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<UpdateCourseRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return bad_request::<CourseResponse>(format_validation_errors(&e));
    }

    match CourseModel::find_by_id(db, course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Course not found")),
            );
        }
        Err(e) => return db_error(e),
    }

    if let Some(teacher_id) = req.teacher_id {
        match is_teacher(db, teacher_id).await {
            Ok(true) => {}
            Ok(false) => return bad_request("teacher_id must reference a teacher"),
            Err(e) => return db_error(e),
        }
    }

    if let Some(code) = &req.code {
        match CourseModel::code_taken(db, code, Some(course_id)).await {
            Ok(true) => {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::error("A course with this code already exists")),
                );
            }
            Ok(false) => {}
            Err(e) => return db_error(e),
        }
    }

    let changes = CourseChanges {
        name: req.name,
        code: req.code,
        teacher_id: req.teacher_id,
    };

    let course = match CourseModel::update(db, course_id, changes).await {
        Ok(c) => c,
        Err(e) => return conflict_or_db_error(e, "A course with this code already exists"),
    };

    match UserModel::find_by_id(db, course.teacher_id).await {
        Ok(teacher) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CourseResponse::new(course, teacher),
                "Course updated successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}
