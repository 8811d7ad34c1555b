use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user::{Model as UserModel, Role};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{UserResponse, bad_request, conflict_or_db_error, db_error};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub role: Role,

    #[validate(length(min = 1, message = "National id cannot be empty"))]
    pub national_id: Option<String>,
}

/// POST /api/users
///
/// Creates a user with any role.
///
/// - `201 Created` the new user
/// - `400 Bad Request` validation failure
/// - `409 Conflict` email or national id already in use
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return bad_request::<UserResponse>(format_validation_errors(&e));
    }

    match UserModel::email_taken(db, &req.email, None).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::error("A user with this email already exists")),
            );
        }
        Ok(false) => {}
        Err(e) => return db_error(e),
    }

    if let Some(national_id) = &req.national_id {
        match UserModel::national_id_taken(db, national_id, None).await {
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

    match UserModel::create(
        db,
        &req.name,
        &req.email,
        &req.password,
        req.role,
        req.national_id.as_deref(),
    )
    .await
    {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User created successfully",
            )),
        ),
        Err(e) => conflict_or_db_error(e, "A user with this email or national id already exists"),
    }
}
