use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{
    course::{CourseScope, Model as CourseModel},
    enrollment::Model as EnrollmentModel,
    user::{Model as UserModel, Role},
};
use util::state::AppState;

use super::common::CourseStudent;
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{CourseResponse, db_error};

/// GET /api/courses
///
/// Admins see every course, teachers the courses they teach and students the
/// courses they are enrolled in. Newest first.
pub async fn list_courses(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    let scope = match user.role() {
        Role::Admin => CourseScope::All,
        Role::Teacher => CourseScope::TaughtBy(user.id()),
        Role::Student => CourseScope::EnrolledBy(user.id()),
    };

    match CourseModel::list(app_state.db(), scope).await {
        Ok(rows) => {
            let courses: Vec<CourseResponse> = rows
                .into_iter()
                .map(|(course, teacher)| CourseResponse::new(course, teacher))
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(courses, "Courses retrieved successfully")),
            )
        }
        Err(e) => db_error(e),
    }
}

/// GET /api/courses/{course_id}
pub async fn get_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let course = match CourseModel::find_by_id(db, course_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Course not found")),
            );
        }
        Err(e) => return db_error(e),
    };

    match UserModel::find_by_id(db, course.teacher_id).await {
        Ok(teacher) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CourseResponse::new(course, teacher),
                "Course retrieved successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}

/// GET /api/courses/{course_id}/students
///
/// Enrolled students ordered by name, with the enrollment period.
pub async fn list_course_students(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    match EnrollmentModel::students_of(app_state.db(), course_id).await {
        Ok(rows) => {
            let students: Vec<CourseStudent> = rows
                .into_iter()
                .map(|(enrollment, student)| CourseStudent {
                    id: student.id,
                    name: student.name,
                    email: student.email,
                    national_id: student.national_id,
                    period: enrollment.period,
                    enrolled_at: enrollment.created_at.to_rfc3339(),
                })
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(students, "Students retrieved successfully")),
            )
        }
        Err(e) => db_error(e),
    }
}
