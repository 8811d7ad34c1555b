//! Response shapes and helpers shared by several route groups.

use crate::response::ApiResponse;
use axum::{Json, http::StatusCode};
use db::models::{course, user};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub national_id: Option<String>,
    pub device_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role.to_string(),
            national_id: u.national_id,
            device_id: u.device_id,
            created_at: u.created_at.to_rfc3339(),
            updated_at: u.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct TeacherSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Default)]
pub struct CourseResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub teacher_id: i64,
    pub teacher: Option<TeacherSummary>,
    pub created_at: String,
    pub updated_at: String,
}

impl CourseResponse {
    pub fn new(c: course::Model, teacher: Option<user::Model>) -> Self {
        Self {
            id: c.id,
            name: c.name,
            code: c.code,
            teacher_id: c.teacher_id,
            teacher: teacher.map(|t| TeacherSummary {
                id: t.id,
                name: t.name,
                email: t.email,
            }),
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Serialize, Default)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// `500` with the database error in the message; the error is logged.
pub fn db_error<T>(e: DbErr) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    tracing::error!(error = %e, "database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(format!("Database error: {e}"))),
    )
}

/// `409` with `message` when `e` is a unique-index violation (a duplicate that
/// raced past the pre-check), otherwise [`db_error`].
pub fn conflict_or_db_error<T>(e: DbErr, message: &str) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return (StatusCode::CONFLICT, Json(ApiResponse::error(message)));
    }
    db_error(e)
}

pub fn bad_request<T>(message: impl Into<String>) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

/// Re-wraps a guard rejection in the handler's response type.
pub fn forward_guard<T>(
    (status, Json(body)): crate::auth::guards::GuardError,
) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    (status, Json(ApiResponse::error(body.message)))
}
