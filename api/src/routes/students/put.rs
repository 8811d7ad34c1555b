use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::user::{Model as UserModel, Role, UserChanges};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{UserResponse, bad_request, conflict_or_db_error, db_error};

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "National id cannot be empty"))]
    pub national_id: Option<String>,
}

/// PUT /api/students/{student_id}
///
/// Updates name, email or national id of a student.
///
/// - `404 Not Found` no such user or the user is not a student
/// - `409 Conflict` email or national id belongs to someone else
pub async fn update_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(req): Json<UpdateStudentRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return bad_request::<UserResponse>(format_validation_errors(&e));
    }

    match UserModel::find_by_id(db, student_id).await {
        Ok(Some(user)) if user.role == Role::Student => {}
        Ok(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Student not found")),
            );
        }
        Err(e) => return db_error(e),
    }

    if let Some(email) = &req.email {
        match UserModel::email_taken(db, email, Some(student_id)).await {
            Ok(true) => {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::error("A user with this email already exists")),
                );
            }
            Ok(false) => {}
            Err(e) => return db_error(e),
        }
    }

    if let Some(national_id) = &req.national_id {
        match UserModel::national_id_taken(db, national_id, Some(student_id)).await {
            Ok(true) => {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::error("A user with this national id already exists")),
                );
            }
            Ok(false) => {}
            Err(e) => return db_error(e),
        }
    }

    let changes = UserChanges {
        name: req.name,
        email: req.email,
        national_id: req.national_id,
        ..Default::default()
    };

    match UserModel::update(db, student_id, changes).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "Student updated successfully",
            )),
        ),
        Err(e) => conflict_or_db_error(e, "A user with this email or national id already exists"),
    }
}
