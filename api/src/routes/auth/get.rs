use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::Model as UserModel;
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{UserResponse, db_error};

/// GET /auth/me
///
/// Profile of the caller. `404` if the account was deleted after the token was issued.
pub async fn get_me(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    match UserModel::find_by_id(app_state.db(), user.id()).await {
        Ok(Some(u)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(u),
                "User data retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ),
        Err(e) => db_error(e),
    }
}
