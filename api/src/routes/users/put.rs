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

#[derive(Debug, Deserialize, Validate, Default)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    pub role: Option<Role>,

    /// Empty string clears it.
    pub national_id: Option<String>,

    pub device_id: Option<String>,
}

/// PUT /api/users/{user_id}
///
/// Partial update; omitted fields are kept.
///
/// - `200 OK` updated user
/// - `400 Bad Request` validation failure
/// - `404 Not Found`
/// - `409 Conflict` email or national id taken by another user
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return bad_request::<UserResponse>(format_validation_errors(&e));
    }

    match UserModel::find_by_id(db, user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("User not found")),
            );
        }
        Err(e) => return db_error(e),
    }

    if let Some(email) = &req.email {
        match UserModel::email_taken(db, email, Some(user_id)).await {
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

    if let Some(national_id) = req.national_id.as_deref().filter(|n| !n.trim().is_empty()) {
        match UserModel::national_id_taken(db, national_id, Some(user_id)).await {
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
        password: req.password,
        role: req.role,
        national_id: req.national_id,
        device_id: req.device_id,
    };

    match UserModel::update(db, user_id, changes).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User updated successfully",
            )),
        ),
        Err(e) => conflict_or_db_error(e, "A user with this email or national id already exists"),
    }
}
