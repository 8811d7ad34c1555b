use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user::Model as UserModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::{UserResponse, db_error};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

/// POST /auth/login
///
/// ### Request Body
/// ```json
/// { "email": "teacher@rollcall.test", "password": "secret" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ token, expires_at, user }`
/// - `400 Bad Request` missing email or password
/// - `404 Not Found` no user with that email
/// - `401 Unauthorized` wrong password
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(format_validation_errors(&e))),
        );
    }

    let user = match UserModel::find_by_email(app_state.db(), &req.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("User not found")),
            );
        }
        Err(e) => return db_error(e),
    };

    if !user.verify_password(&req.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid password")),
        );
    }

    let (token, expires_at) = match generate_jwt(user.id, user.role) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "failed to sign session token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Could not issue token")),
            );
        }
    };

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            LoginResponse {
                token,
                expires_at,
                user: user.into(),
            },
            "Login successful",
        )),
    )
}
